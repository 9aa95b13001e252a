use std::{fs::File, io::BufReader, path::Path};

use crate::{
    SceneError, SceneResult,
    counter::counter::CounterDef,
    particles::def::ParticleDef,
    scrub::video::ScrollVideoDef,
    timeline::model::TimelineDef,
};

/// Static configuration of a page's scroll scenes, as authored in JSON.
///
/// Every section is optional; absent sections mean the page does not use that component.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// The scroll-scrubbed video, if any.
    #[serde(default)]
    pub video: Option<ScrollVideoDef>,
    /// The pinned chapter story, if any.
    #[serde(default)]
    pub story: Option<TimelineDef>,
    /// The particle logo intro, if any.
    #[serde(default)]
    pub particles: Option<ParticleDef>,
    /// Count-up statistics.
    #[serde(default)]
    pub counters: Vec<CounterDef>,
}

impl SceneConfig {
    /// Parse from a JSON reader.
    #[tracing::instrument(skip(r))]
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SceneError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse from a JSON file on disk.
    #[tracing::instrument(skip_all)]
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading scene config");
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every present section.
    pub fn validate(&self) -> SceneResult<()> {
        if let Some(video) = &self.video {
            video.validate()?;
        }
        if let Some(story) = &self.story {
            story.validate()?;
        }
        if let Some(particles) = &self.particles {
            particles.validate()?;
        }
        for counter in &self.counters {
            counter.validate()?;
        }
        tracing::debug!(
            video = self.video.is_some(),
            story = self.story.is_some(),
            particles = self.particles.is_some(),
            counters = self.counters.len(),
            "scene config valid"
        );
        Ok(())
    }

    /// Parse then validate.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let cfg = Self::from_path(path)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
