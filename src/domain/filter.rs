//! Filter set compilation into the provider's query-argument shape

use serde::{Deserialize, Serialize};

use crate::domain::GatewayError;

/// Default carat bounds used when the caller supplies only one side of the range
pub const DEFAULT_CARAT_FROM: f64 = 0.3;
pub const DEFAULT_CARAT_TO: f64 = 20.0;

/// Default price bounds used when the caller supplies only one side of the range
pub const DEFAULT_PRICE_FROM: f64 = 0.0;
pub const DEFAULT_PRICE_TO: f64 = 1_000_000.0;

/// A filter input that accepts either a single value or a collection
///
/// Inbound callers (web handlers, CLI flags) frequently send a bare string
/// where a list is expected; both deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(String::from).collect())
    }
}

/// Free-form search filters accepted from callers
///
/// Unrecognized keys in the inbound payload are ignored on deserialization;
/// every recognized filter is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    pub shape: Option<OneOrMany>,
    pub carat_min: Option<f64>,
    pub carat_max: Option<f64>,
    pub color: Option<OneOrMany>,
    pub clarity: Option<OneOrMany>,
    pub cut: Option<OneOrMany>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub lab: Option<OneOrMany>,
    pub polish: Option<OneOrMany>,
    pub symmetry: Option<OneOrMany>,
    pub fluorescence: Option<OneOrMany>,
    pub has_video: Option<bool>,
    pub has_image: Option<bool>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shapes(mut self, shapes: impl Into<OneOrMany>) -> Self {
        self.shape = Some(shapes.into());
        self
    }

    pub fn with_carat_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.carat_min = min;
        self.carat_max = max;
        self
    }

    pub fn with_colors(mut self, colors: impl Into<OneOrMany>) -> Self {
        self.color = Some(colors.into());
        self
    }

    pub fn with_clarities(mut self, clarities: impl Into<OneOrMany>) -> Self {
        self.clarity = Some(clarities.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_has_video(mut self, has_video: bool) -> Self {
        self.has_video = Some(has_video);
        self
    }

    /// Compiles the filter set into the provider's argument shape
    ///
    /// A filter family is emitted only when at least one of its inputs is
    /// present; the provider treats an absent field differently from an empty
    /// one, so absent families are omitted from the serialized output
    /// entirely. Multi-valued families are normalized to a sorted,
    /// deduplicated list so that logically identical filter sets compile to
    /// identical arguments (and therefore identical cache keys).
    pub fn compile(&self) -> Result<DiamondQueryFilters, GatewayError> {
        let mut compiled = DiamondQueryFilters::default();

        // Shape values are upper-cased; the provider enum is case-sensitive.
        compiled.shapes = self.shape.as_ref().map(|v| normalize(v, true));
        compiled.colors = self.color.as_ref().map(|v| normalize(v, false));
        compiled.clarities = self.clarity.as_ref().map(|v| normalize(v, false));
        compiled.cuts = self.cut.as_ref().map(|v| normalize(v, false));
        compiled.labs = self.lab.as_ref().map(|v| normalize(v, false));
        compiled.polishes = self.polish.as_ref().map(|v| normalize(v, false));
        compiled.symmetries = self.symmetry.as_ref().map(|v| normalize(v, false));
        compiled.fluorescences = self.fluorescence.as_ref().map(|v| normalize(v, false));

        if self.carat_min.is_some() || self.carat_max.is_some() {
            let from = self.carat_min.unwrap_or(DEFAULT_CARAT_FROM);
            let to = self.carat_max.unwrap_or(DEFAULT_CARAT_TO);

            if from > to {
                return Err(GatewayError::validation(format!(
                    "carat range is inverted: {} > {}",
                    from, to
                )));
            }

            compiled.size_from = Some(from);
            compiled.size_to = Some(to);
        }

        if self.price_min.is_some() || self.price_max.is_some() {
            let from = self.price_min.unwrap_or(DEFAULT_PRICE_FROM);
            let to = self.price_max.unwrap_or(DEFAULT_PRICE_TO);

            if from > to {
                return Err(GatewayError::validation(format!(
                    "price range is inverted: {} > {}",
                    from, to
                )));
            }

            compiled.price_from = Some(from);
            compiled.price_to = Some(to);
        }

        // Tri-state: emitted only when the caller set them explicitly.
        compiled.has_v360 = self.has_video;
        compiled.has_image = self.has_image;

        Ok(compiled)
    }
}

fn normalize(values: &OneOrMany, uppercase: bool) -> Vec<String> {
    let mut normalized: Vec<String> = values
        .to_vec()
        .into_iter()
        .map(|v| {
            let trimmed = v.trim();
            if uppercase {
                trimmed.to_uppercase()
            } else {
                trimmed.to_string()
            }
        })
        .filter(|v| !v.is_empty())
        .collect();

    normalized.sort();
    normalized.dedup();
    normalized
}

/// Query arguments in the provider's wire shape
///
/// Serialized directly into the GraphQL variables payload. `None` fields are
/// skipped so absent filter families never reach the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiamondQueryFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_to: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_to: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polishes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symmetries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fluorescences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_v360: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_image: Option<bool>,
}

/// Catalog of filter values the provider recognizes
///
/// Static data for callers building filter UIs; the provider exposes no
/// introspection endpoint for these.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub shapes: &'static [&'static str],
    pub colors: &'static [&'static str],
    pub clarities: &'static [&'static str],
    pub cuts: &'static [&'static str],
    pub labs: &'static [&'static str],
    pub fluorescences: &'static [&'static str],
}

impl FilterOptions {
    pub fn provider_defaults() -> Self {
        Self {
            shapes: &[
                "Round", "Princess", "Cushion", "Emerald", "Oval", "Radiant", "Asscher",
                "Marquise", "Heart", "Pear",
            ],
            colors: &["D", "E", "F", "G", "H", "I", "J", "K", "L", "M"],
            clarities: &[
                "FL", "IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "I1", "I2",
            ],
            cuts: &["Ideal", "Excellent", "Very Good", "Good", "Fair", "Poor"],
            labs: &["GIA", "IGI", "HRD", "GCAL"],
            fluorescences: &["None", "Faint", "Medium", "Strong", "Very Strong"],
        }
    }
}
