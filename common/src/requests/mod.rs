use serde::Deserialize;

/// Raw payload of the "Add Cafe" form, exactly as the browser posted it.
///
/// Every field is optional here: an unchecked checkbox is simply absent from
/// the body, and a hand-crafted request may leave out anything. Turning this
/// into a `NewCafe` is the job of `validation::validate_submission`.
///
/// The cafe name travels as `cafe` (the input name used by the form); `name`
/// is accepted as well for clients that post the model field name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CafeSubmission {
    #[serde(rename = "cafe", alias = "name")]
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
    /// Anti-forgery token rendered into the form as a hidden input.
    pub csrf_token: Option<String>,
}

impl CafeSubmission {
    /// Builds a submission from raw `application/x-www-form-urlencoded` pairs.
    ///
    /// Unlike deserializing straight into the struct, this never fails: the
    /// first value of a repeated key wins, `cafe` and `name` fill the same
    /// slot, and unknown keys (such as the submit button) are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "cafe" | "name" => &mut submission.name,
                "location" => &mut submission.location,
                "map_url" => &mut submission.map_url,
                "img_url" => &mut submission.img_url,
                "has_sockets" => &mut submission.has_sockets,
                "has_toilet" => &mut submission.has_toilet,
                "has_wifi" => &mut submission.has_wifi,
                "can_take_calls" => &mut submission.can_take_calls,
                "seats" => &mut submission.seats,
                "coffee_price" => &mut submission.coffee_price,
                "csrf_token" => &mut submission.csrf_token,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        submission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_fills_known_fields() {
        let submission = CafeSubmission::from_pairs([
            ("cafe", "Blue Bottle"),
            ("has_wifi", "y"),
            ("csrf_token", "abc"),
            ("submit", "Add Cafe"),
        ]);
        assert_eq!(submission.name.as_deref(), Some("Blue Bottle"));
        assert_eq!(submission.has_wifi.as_deref(), Some("y"));
        assert_eq!(submission.csrf_token.as_deref(), Some("abc"));
        assert_eq!(submission.location, None);
    }

    #[test]
    fn from_pairs_keeps_first_of_repeated_keys() {
        let submission = CafeSubmission::from_pairs([
            ("cafe", "A"),
            ("name", "B"),
            ("has_wifi", "y"),
            ("has_wifi", "n"),
        ]);
        assert_eq!(submission.name.as_deref(), Some("A"));
        assert_eq!(submission.has_wifi.as_deref(), Some("y"));
    }
}
