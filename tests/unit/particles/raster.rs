use std::io::Cursor;

use super::*;

const BLUE_RECT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
  <rect x="0" y="0" width="4" height="2" fill="#0000ff"/>
</svg>"##;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn new_checks_buffer_length() {
    assert!(Raster::new(2, 2, vec![0; 15]).is_err());
    let r = Raster::new(2, 2, vec![0; 16]).unwrap();
    assert_eq!((r.width(), r.height()), (2, 2));
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 255]).unwrap();
    let r = Raster::decode(&png_bytes(img)).unwrap();
    assert_eq!(r.pixel(0, 0), Rgba8::rgba(100, 50, 200, 128));
    assert_eq!(r.pixel(1, 0), Rgba8::rgba(1, 2, 3, 255));
}

#[test]
fn pixels_outside_are_transparent() {
    let r = Raster::from_image(image::RgbaImage::from_pixel(1, 1, image::Rgba([9, 9, 9, 255])));
    assert_eq!(r.pixel(1, 0), Rgba8::TRANSPARENT);
    assert_eq!(r.pixel(0, 7), Rgba8::TRANSPARENT);
}

#[test]
fn svg_rasterizes_at_intrinsic_size_and_scale() {
    let r = Raster::from_svg(BLUE_RECT.as_bytes(), 1.0).unwrap();
    assert_eq!((r.width(), r.height()), (4, 2));
    assert_eq!(r.pixel(1, 1), Rgba8::rgba(0, 0, 255, 255));

    let big = Raster::from_svg(BLUE_RECT.as_bytes(), 2.0).unwrap();
    assert_eq!((big.width(), big.height()), (8, 4));
    assert!(Raster::from_svg(BLUE_RECT.as_bytes(), 0.0).is_err());
}

#[test]
fn from_bytes_sniffs_format() {
    let svg = Raster::from_bytes(BLUE_RECT.as_bytes()).unwrap();
    assert_eq!(svg.width(), 4);

    let with_prolog = format!(r#"<?xml version="1.0"?>{BLUE_RECT}"#);
    assert_eq!(Raster::from_bytes(with_prolog.as_bytes()).unwrap().height(), 2);

    let png = png_bytes(image::RgbaImage::from_pixel(3, 3, image::Rgba([0, 0, 0, 255])));
    assert_eq!(Raster::from_bytes(&png).unwrap().width(), 3);

    assert!(Raster::from_bytes(b"not an image").is_err());
    assert!(Raster::from_bytes(b"<svg").is_err());
}

#[test]
fn demultiply_restores_straight_color() {
    let mut px = vec![64, 0, 32, 128, 10, 20, 30, 0, 1, 2, 3, 255];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 0, 64, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 0]);
    assert_eq!(&px[8..], &[1, 2, 3, 255]);
}
