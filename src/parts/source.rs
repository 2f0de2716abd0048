use crate::{
    parts::selection::Selection, parts::set::PartSet, parts::variants::ColorVariantPartSet,
    prng::stream::RandomStream,
};

/// Anything a builder can pick parts from.
#[derive(Clone, Debug)]
pub enum PartSource {
    /// A single appearance template.
    Plain(PartSet),
    /// A color choice followed by a template of that color.
    Colored(ColorVariantPartSet),
}

impl PartSource {
    /// Registered name.
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(set) => set.name(),
            Self::Colored(set) => set.name(),
        }
    }

    /// Choose files for one avatar, consuming values from `stream`.
    pub fn pick(&self, stream: &mut RandomStream) -> Selection {
        match self {
            Self::Plain(set) => set.pick(stream),
            Self::Colored(set) => set.pick(stream),
        }
    }
}

impl From<PartSet> for PartSource {
    fn from(set: PartSet) -> Self {
        Self::Plain(set)
    }
}

impl From<ColorVariantPartSet> for PartSource {
    fn from(set: ColorVariantPartSet) -> Self {
        Self::Colored(set)
    }
}
