//! Cafe records and the value types they are built from.
//!
//! Amenity flags are plain `bool`s and seating is a closed enum; the `0`/`1`
//! and bucket-code encodings only exist at the form and storage boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::{Host, Url};

/// Store-assigned cafe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CafeId(i32);

impl CafeId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CafeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seating capacity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatingCapacity {
    /// 0 - 10 seats.
    UpToTen,
    /// 10 - 20 seats.
    TenToTwenty,
    /// 20 - 30 seats.
    TwentyToThirty,
    /// 30 - 40 seats.
    ThirtyToForty,
    /// 40 - 50 seats.
    FortyToFifty,
    /// More than 50 seats.
    FiftyPlus,
}

impl SeatingCapacity {
    /// Every bucket, in display order.
    pub const ALL: [Self; 6] = [
        Self::UpToTen,
        Self::TenToTwenty,
        Self::TwentyToThirty,
        Self::ThirtyToForty,
        Self::FortyToFifty,
        Self::FiftyPlus,
    ];

    /// Short code used by the form and the `seats` column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UpToTen => "0",
            Self::TenToTwenty => "1",
            Self::TwentyToThirty => "2",
            Self::ThirtyToForty => "3",
            Self::FortyToFifty => "4",
            Self::FiftyPlus => "5",
        }
    }

    /// Label shown to visitors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpToTen => "0 - 10",
            Self::TenToTwenty => "10 - 20",
            Self::TwentyToThirty => "20 - 30",
            Self::ThirtyToForty => "30 - 40",
            Self::FortyToFifty => "40 - 50",
            Self::FiftyPlus => "50 +",
        }
    }

    /// Parse a bucket code; anything outside `0`..`5` is rejected.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.code() == code)
    }
}

impl fmt::Display for SeatingCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Encode an amenity flag for the form and the integer columns.
#[must_use]
pub const fn flag_code(flag: bool) -> &'static str {
    if flag { "1" } else { "0" }
}

/// Decode an amenity flag; only `0` and `1` are accepted.
#[must_use]
pub fn flag_from_code(code: &str) -> Option<bool> {
    match code {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// Reasons a string is not accepted as an [`HttpsUrl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HttpsUrlError {
    /// Not an absolute URL with a host and top-level domain.
    #[error("Invalid URL")]
    Malformed,
    /// The raw text does not start with `https`.
    #[error("URL must begin with https")]
    MissingHttpsPrefix,
}

/// A well-formed URL whose raw text begins with `https`.
///
/// The prefix check is deliberately textual: the value must literally start
/// with `https`, so leading whitespace or an upper-case scheme is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HttpsUrl(String);

impl HttpsUrl {
    /// Validate `raw`, reporting the first violated rule.
    pub fn new(raw: impl Into<String>) -> Result<Self, HttpsUrlError> {
        let raw = raw.into();
        match Self::violations(&raw).first() {
            Some(error) => Err(*error),
            None => Ok(Self(raw)),
        }
    }

    /// Every rule `raw` violates, in a stable order.
    #[must_use]
    pub fn violations(raw: &str) -> Vec<HttpsUrlError> {
        let mut violations = Vec::new();
        if !is_well_formed(raw) {
            violations.push(HttpsUrlError::Malformed);
        }
        if !raw.starts_with("https") {
            violations.push(HttpsUrlError::MissingHttpsPrefix);
        }
        violations
    }

    /// The URL exactly as submitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Absolute URL with a host; domain hosts need a plausible top-level domain.
fn is_well_formed(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    match url.host() {
        Some(Host::Domain(domain)) => has_top_level_domain(domain),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
        None => false,
    }
}

fn has_top_level_domain(domain: &str) -> bool {
    let mut labels = domain.trim_end_matches('.').rsplit('.');
    let Some(tld) = labels.next() else {
        return false;
    };
    let has_parent = labels.next().is_some_and(|label| !label.is_empty());
    let plausible_tld = tld.starts_with("xn--")
        || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    has_parent && plausible_tld
}

impl AsRef<str> for HttpsUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HttpsUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HttpsUrl {
    type Error = HttpsUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HttpsUrl> for String {
    fn from(value: HttpsUrl) -> Self {
        value.0
    }
}

/// A validated cafe that has not been stored yet.
///
/// Produced by [`CafeForm::validate`](super::CafeForm::validate); every field
/// is populated so a partial record can never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCafe {
    pub name: String,
    pub map_url: HttpsUrl,
    pub img_url: HttpsUrl,
    pub location: String,
    pub has_sockets: bool,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub can_take_calls: bool,
    pub seats: SeatingCapacity,
    pub coffee_price: String,
}

/// A stored cafe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cafe {
    id: CafeId,
    #[serde(flatten)]
    details: NewCafe,
}

impl Cafe {
    /// Pair stored details with their identifier.
    #[must_use]
    pub fn new(id: CafeId, details: NewCafe) -> Self {
        Self { id, details }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> CafeId {
        self.id
    }

    /// Descriptive and amenity fields.
    #[must_use]
    pub fn details(&self) -> &NewCafe {
        &self.details
    }

    /// Cafe name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Split into identifier and details.
    #[must_use]
    pub fn into_parts(self) -> (CafeId, NewCafe) {
        (self.id, self.details)
    }
}
