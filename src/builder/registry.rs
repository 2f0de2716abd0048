use std::collections::BTreeMap;

use image::RgbaImage;

use crate::{
    builder::config::{BuilderConfig, SetKind},
    compose::compositor::Compositor,
    foundation::error::{RobohashError, RobohashResult},
    parts::selection::Selection,
    parts::set::PartSet,
    parts::source::PartSource,
    parts::variants::ColorVariantPartSet,
    prng::stream::{PUBLIC_SEED, RandomStream},
};

/// Registry of named part sets plus the compositor that flattens their picks.
///
/// Built once at startup and then shared read-only by concurrent requests.
#[derive(Debug)]
pub struct RobohashBuilder {
    sets: BTreeMap<String, PartSource>,
    default_set: String,
    default_seed: Vec<u8>,
    compositor: Compositor,
}

impl Default for RobohashBuilder {
    fn default() -> Self {
        Self::new(Compositor::new())
    }
}

impl RobohashBuilder {
    /// Empty registry using the public seed and `set1` as the default set.
    pub fn new(compositor: Compositor) -> Self {
        Self {
            sets: BTreeMap::new(),
            default_set: BuilderConfig::default().default_set,
            default_seed: PUBLIC_SEED.to_vec(),
            compositor,
        }
    }

    /// Scan and register every configured set.
    ///
    /// Any set failing its entropy or variant check aborts construction.
    #[tracing::instrument(skip(config), fields(sets_dir = %config.sets_dir.display()))]
    pub fn from_config(config: &BuilderConfig) -> RobohashResult<Self> {
        config.validate()?;
        let compositor = if config.cache_layers {
            Compositor::with_cache()
        } else {
            Compositor::new()
        };
        let mut out = Self::new(compositor)
            .with_default_set(config.default_set.clone())
            .with_default_seed(config.default_seed.as_bytes());

        for set in &config.sets {
            let source = match set.kind {
                SetKind::Plain => PartSource::Plain(PartSet::open(&config.sets_dir, &set.name)?),
                SetKind::Colored => PartSource::Colored(ColorVariantPartSet::open(
                    &config.sets_dir,
                    &set.name,
                )?),
            };
            out.register(source)?;
        }
        tracing::info!(sets = out.sets.len(), "registered part sets");
        Ok(out)
    }

    /// Replace the set used for requests that name none.
    pub fn with_default_set(mut self, name: impl Into<String>) -> Self {
        self.default_set = name.into();
        self
    }

    /// Replace the seed used for requests that supply none.
    pub fn with_default_seed(mut self, seed: impl Into<Vec<u8>>) -> Self {
        self.default_seed = seed.into();
        self
    }

    /// Register a set under its own name.
    pub fn register(&mut self, source: impl Into<PartSource>) -> RobohashResult<()> {
        let source = source.into();
        let name = source.name().to_string();
        if self.sets.contains_key(&name) {
            return Err(RobohashError::validation(format!(
                "set '{name}' is already registered"
            )));
        }
        tracing::debug!(set = %name, "registered set");
        self.sets.insert(name, source);
        Ok(())
    }

    /// Registered set names, sorted.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Registered set by name.
    pub fn get(&self, name: &str) -> Option<&PartSource> {
        self.sets.get(name)
    }

    /// Compositor used by [`Self::build`].
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Map an empty name to the default set; fail on names that were never registered.
    pub fn resolve_set_name<'a>(&'a self, name: &'a str) -> RobohashResult<&'a str> {
        let name = if name.is_empty() {
            self.default_set.as_str()
        } else {
            name
        };
        if self.sets.contains_key(name) {
            Ok(name)
        } else {
            Err(RobohashError::UnknownSet(name.to_string()))
        }
    }

    /// Choose layer files for `input` without compositing them.
    pub fn pick(
        &self,
        input: &[u8],
        seed: Option<&[u8]>,
        set_name: &str,
    ) -> RobohashResult<Selection> {
        let name = self.resolve_set_name(set_name)?;
        let source = self
            .sets
            .get(name)
            .ok_or_else(|| RobohashError::UnknownSet(name.to_string()))?;

        let seed = seed.unwrap_or(self.default_seed.as_slice());
        let mut stream = RandomStream::new(input, seed);
        Ok(source.pick(&mut stream))
    }

    /// Build the avatar for `input` at the set's native resolution.
    ///
    /// Text inputs must be converted to UTF-8 bytes by the caller.
    #[tracing::instrument(skip(self, input, seed), fields(input_len = input.len()))]
    pub fn build(
        &self,
        input: &[u8],
        seed: Option<&[u8]>,
        set_name: &str,
    ) -> RobohashResult<RgbaImage> {
        let selection = self.pick(input, seed, set_name)?;
        tracing::debug!(
            tag = %selection.tag_key(),
            layers = selection.files().len(),
            "picked parts"
        );
        self.compositor.compose_in(selection.root(), selection.files())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builder/registry.rs"]
mod tests;
