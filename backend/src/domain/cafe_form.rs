//! Add-cafe form input and its validation rules.
//!
//! [`CafeForm`] holds the raw submitted strings. [`CafeForm::validate`] runs
//! every rule against every field and either yields a [`NewCafe`] or the full
//! set of [`FormErrors`] so the form can be re-rendered with annotations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cafe::{HttpsUrl, NewCafe, SeatingCapacity, flag_from_code};

/// Message for a missing or blank value.
pub const REQUIRED_MESSAGE: &str = "This field is required.";
/// Message for a value outside the allowed choices.
pub const INVALID_CHOICE_MESSAGE: &str = "Not a valid choice.";
/// Message attached to `name` when the store already holds that name.
pub const DUPLICATE_NAME_MESSAGE: &str = "A cafe with this name already exists.";

/// Fields of the add-cafe form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CafeField {
    Name,
    Location,
    MapUrl,
    ImgUrl,
    HasSockets,
    HasToilet,
    HasWifi,
    CanTakeCalls,
    Seats,
    CoffeePrice,
}

impl CafeField {
    /// Every field, in display order.
    pub const ALL: [Self; 10] = [
        Self::Name,
        Self::Location,
        Self::MapUrl,
        Self::ImgUrl,
        Self::HasSockets,
        Self::HasToilet,
        Self::HasWifi,
        Self::CanTakeCalls,
        Self::Seats,
        Self::CoffeePrice,
    ];

    /// Form control name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::MapUrl => "map_url",
            Self::ImgUrl => "img_url",
            Self::HasSockets => "has_sockets",
            Self::HasToilet => "has_toilet",
            Self::HasWifi => "has_wifi",
            Self::CanTakeCalls => "can_take_calls",
            Self::Seats => "seats",
            Self::CoffeePrice => "coffee_price",
        }
    }

    /// Label rendered next to the control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Cafe name",
            Self::Location => "Location",
            Self::MapUrl => "Cafe location on Google Maps (URL)",
            Self::ImgUrl => "Image of the cafe (URL)",
            Self::HasSockets => "Power sockets available?",
            Self::HasToilet => "Toilets available?",
            Self::HasWifi => "Wi-Fi available?",
            Self::CanTakeCalls => "Can take calls?",
            Self::Seats => "Number of seats",
            Self::CoffeePrice => "Coffee price",
        }
    }
}

/// Validation failures keyed by field, plus form-level messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    fields: BTreeMap<CafeField, Vec<String>>,
    form: Vec<String>,
}

impl FormErrors {
    /// Record a message against `field`.
    pub fn add(&mut self, field: CafeField, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Record a message that is not tied to a single field.
    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    /// Messages recorded against `field`.
    #[must_use]
    pub fn for_field(&self, field: CafeField) -> &[String] {
        self.fields.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Form-level messages.
    #[must_use]
    pub fn form_errors(&self) -> &[String] {
        &self.form
    }

    /// Fields that failed, in display order.
    pub fn fields(&self) -> impl Iterator<Item = CafeField> + '_ {
        self.fields.keys().copied()
    }

    /// `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }
}

/// Raw add-cafe submission; absent controls deserialise to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeForm {
    pub name: Option<String>,
    pub location: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub has_sockets: Option<String>,
    pub has_toilet: Option<String>,
    pub has_wifi: Option<String>,
    pub can_take_calls: Option<String>,
    pub seats: Option<String>,
    pub coffee_price: Option<String>,
}

impl CafeForm {
    /// Raw value submitted for `field`.
    #[must_use]
    pub fn value(&self, field: CafeField) -> Option<&str> {
        let value = match field {
            CafeField::Name => &self.name,
            CafeField::Location => &self.location,
            CafeField::MapUrl => &self.map_url,
            CafeField::ImgUrl => &self.img_url,
            CafeField::HasSockets => &self.has_sockets,
            CafeField::HasToilet => &self.has_toilet,
            CafeField::HasWifi => &self.has_wifi,
            CafeField::CanTakeCalls => &self.can_take_calls,
            CafeField::Seats => &self.seats,
            CafeField::CoffeePrice => &self.coffee_price,
        };
        value.as_deref()
    }

    /// Check every field and build the record when all of them pass.
    ///
    /// Values are kept exactly as submitted; nothing is trimmed.
    ///
    /// # Examples
    /// ```
    /// use cafes::domain::{CafeField, CafeForm};
    ///
    /// let errors = CafeForm::default().validate().unwrap_err();
    /// assert_eq!(errors.for_field(CafeField::Name), ["This field is required."]);
    /// ```
    pub fn validate(&self) -> Result<NewCafe, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.text(CafeField::Name, &mut errors);
        let location = self.text(CafeField::Location, &mut errors);
        let map_url = self.url(CafeField::MapUrl, &mut errors);
        let img_url = self.url(CafeField::ImgUrl, &mut errors);
        let has_sockets = self.flag(CafeField::HasSockets, &mut errors);
        let has_toilet = self.flag(CafeField::HasToilet, &mut errors);
        let has_wifi = self.flag(CafeField::HasWifi, &mut errors);
        let can_take_calls = self.flag(CafeField::CanTakeCalls, &mut errors);
        let seats = self.choice(CafeField::Seats, SeatingCapacity::from_code, &mut errors);
        let coffee_price = self.text(CafeField::CoffeePrice, &mut errors);

        match (
            name,
            location,
            map_url,
            img_url,
            has_sockets,
            has_toilet,
            has_wifi,
            can_take_calls,
            seats,
            coffee_price,
        ) {
            (
                Some(name),
                Some(location),
                Some(map_url),
                Some(img_url),
                Some(has_sockets),
                Some(has_toilet),
                Some(has_wifi),
                Some(can_take_calls),
                Some(seats),
                Some(coffee_price),
            ) if errors.is_empty() => Ok(NewCafe {
                name,
                map_url,
                img_url,
                location,
                has_sockets,
                has_toilet,
                has_wifi,
                can_take_calls,
                seats,
                coffee_price,
            }),
            _ => Err(errors),
        }
    }

    /// Non-blank value, or `None` after recording the required error.
    fn required(&self, field: CafeField, errors: &mut FormErrors) -> Option<&str> {
        match self.value(field) {
            Some(raw) if !raw.trim().is_empty() => Some(raw),
            _ => {
                errors.add(field, REQUIRED_MESSAGE);
                None
            }
        }
    }

    fn text(&self, field: CafeField, errors: &mut FormErrors) -> Option<String> {
        self.required(field, errors).map(str::to_owned)
    }

    fn url(&self, field: CafeField, errors: &mut FormErrors) -> Option<HttpsUrl> {
        let raw = self.required(field, errors)?;
        let violations = HttpsUrl::violations(raw);
        for violation in &violations {
            errors.add(field, violation.to_string());
        }
        if !violations.is_empty() {
            return None;
        }
        HttpsUrl::new(raw).ok()
    }

    fn flag(&self, field: CafeField, errors: &mut FormErrors) -> Option<bool> {
        self.choice(field, flag_from_code, errors)
    }

    fn choice<T>(
        &self,
        field: CafeField,
        parse: impl Fn(&str) -> Option<T>,
        errors: &mut FormErrors,
    ) -> Option<T> {
        let raw = self.required(field, errors)?;
        let parsed = parse(raw);
        if parsed.is_none() {
            errors.add(field, INVALID_CHOICE_MESSAGE);
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn blue_bottle() -> CafeForm {
        CafeForm {
            name: Some("Blue Bottle".into()),
            location: Some("Shoreditch".into()),
            map_url: Some("https://maps.example/blue".into()),
            img_url: Some("https://img.example/blue.jpg".into()),
            has_sockets: Some("1".into()),
            has_toilet: Some("0".into()),
            has_wifi: Some("1".into()),
            can_take_calls: Some("0".into()),
            seats: Some("1".into()),
            coffee_price: Some("£2.80".into()),
        }
    }

    #[rstest]
    fn valid_form_builds_record(blue_bottle: CafeForm) {
        let cafe = blue_bottle.validate().expect("form is valid");
        assert_eq!(cafe.name, "Blue Bottle");
        assert_eq!(cafe.location, "Shoreditch");
        assert_eq!(cafe.map_url.as_str(), "https://maps.example/blue");
        assert!(cafe.has_sockets);
        assert!(!cafe.has_toilet);
        assert!(cafe.has_wifi);
        assert!(!cafe.can_take_calls);
        assert_eq!(cafe.seats, SeatingCapacity::TenToTwenty);
        assert_eq!(cafe.coffee_price, "£2.80");
    }

    #[rstest]
    fn http_map_url_reports_only_prefix_error(mut blue_bottle: CafeForm) {
        blue_bottle.map_url = Some("http://maps.example/blue".into());
        let errors = blue_bottle.validate().expect_err("http is rejected");
        assert_eq!(
            errors.for_field(CafeField::MapUrl),
            ["URL must begin with https"]
        );
        assert_eq!(errors.fields().collect::<Vec<_>>(), [CafeField::MapUrl]);
    }

    #[rstest]
    fn garbage_with_https_prefix_reports_only_url_error(mut blue_bottle: CafeForm) {
        blue_bottle.img_url = Some("https-not-a-url".into());
        let errors = blue_bottle.validate().expect_err("garbage is rejected");
        assert_eq!(errors.for_field(CafeField::ImgUrl), ["Invalid URL"]);
    }

    #[rstest]
    fn bare_host_reports_both_url_errors(mut blue_bottle: CafeForm) {
        blue_bottle.img_url = Some("img.example/blue.jpg".into());
        let errors = blue_bottle.validate().expect_err("bare host is rejected");
        assert_eq!(
            errors.for_field(CafeField::ImgUrl),
            ["Invalid URL", "URL must begin with https"]
        );
    }

    #[rstest]
    fn empty_form_flags_every_field() {
        let errors = CafeForm::default().validate().expect_err("empty form");
        for field in CafeField::ALL {
            assert_eq!(errors.for_field(field), [REQUIRED_MESSAGE], "{field:?}");
        }
        assert!(errors.form_errors().is_empty());
    }

    #[rstest]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    #[case(None)]
    fn blank_location_is_required(mut blue_bottle: CafeForm, #[case] location: Option<String>) {
        blue_bottle.location = location;
        let errors = blue_bottle.validate().expect_err("location missing");
        assert_eq!(errors.for_field(CafeField::Location), [REQUIRED_MESSAGE]);
    }

    #[rstest]
    #[case("2")]
    #[case("yes")]
    #[case("true")]
    fn amenity_outside_choices_is_rejected(mut blue_bottle: CafeForm, #[case] raw: &str) {
        blue_bottle.has_wifi = Some(raw.into());
        let errors = blue_bottle.validate().expect_err("invalid flag");
        assert_eq!(errors.for_field(CafeField::HasWifi), [INVALID_CHOICE_MESSAGE]);
    }

    #[rstest]
    fn seats_outside_codes_is_rejected(mut blue_bottle: CafeForm) {
        blue_bottle.seats = Some("6".into());
        let errors = blue_bottle.validate().expect_err("invalid seats");
        assert_eq!(errors.for_field(CafeField::Seats), [INVALID_CHOICE_MESSAGE]);
    }

    #[rstest]
    #[case("$3.50 small, $4.20 large")]
    #[case("£2.80 (oat milk +30p), free refills before 9am")]
    fn coffee_price_is_free_text(mut blue_bottle: CafeForm, #[case] price: &str) {
        blue_bottle.coffee_price = Some(price.into());
        let cafe = blue_bottle.validate().expect("any non-blank price is accepted");
        assert_eq!(cafe.coffee_price, price);
    }

    #[rstest]
    fn long_free_text_is_accepted(mut blue_bottle: CafeForm) {
        blue_bottle.name = Some("n".repeat(400));
        blue_bottle.location = Some("l".repeat(400));
        assert!(blue_bottle.validate().is_ok());
    }

    #[rstest]
    fn values_are_not_trimmed(mut blue_bottle: CafeForm) {
        blue_bottle.name = Some("  Blue Bottle ".into());
        let cafe = blue_bottle.validate().expect("form is valid");
        assert_eq!(cafe.name, "  Blue Bottle ");
    }

    #[rstest]
    fn form_errors_track_form_level_messages() {
        let mut errors = FormErrors::default();
        assert!(errors.is_empty());
        errors.add_form_error("expired");
        assert!(!errors.is_empty());
        assert_eq!(errors.form_errors(), ["expired"]);
        assert!(errors.for_field(CafeField::Name).is_empty());
    }
}
