use serde::Deserialize;

/// Response body of the `/quote` endpoint.
///
/// The portfolio math only consumes `current` (`"c"` upstream); the remaining
/// fields are part of the payload and deserialized for completeness. Missing
/// numeric fields default to 0 rather than failing the whole response.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Quote {
    /// Current price
    #[serde(rename = "c", default)]
    pub current: f64,
    /// Absolute change since previous close
    #[serde(rename = "d", default)]
    pub change: Option<f64>,
    /// Percent change since previous close
    #[serde(rename = "dp", default)]
    pub percent_change: Option<f64>,
    /// High price of the day
    #[serde(rename = "h", default)]
    pub high: f64,
    /// Low price of the day
    #[serde(rename = "l", default)]
    pub low: f64,
    /// Open price of the day
    #[serde(rename = "o", default)]
    pub open: f64,
    /// Previous close price
    #[serde(rename = "pc", default)]
    pub previous_close: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_quote() {
        let body = r#"{"c":262.52,"d":1.28,"dp":0.49,"h":263.31,"l":260.68,"o":261.07,"pc":261.24,"t":1582641000}"#;

        let quote: Quote = serde_json::from_str(body).unwrap();

        assert_eq!(quote.current, 262.52);
        assert_eq!(quote.previous_close, 261.24);
        assert_eq!(quote.change, Some(1.28));
    }

    #[test]
    fn missing_current_price_defaults_to_zero() {
        let body = r#"{"h":10.0,"l":9.0}"#;

        let quote: Quote = serde_json::from_str(body).unwrap();

        assert_eq!(quote.current, 0.0);
        assert_eq!(quote.change, None);
    }

    #[test]
    fn null_change_fields_are_accepted() {
        let body = r#"{"c":5.5,"d":null,"dp":null,"h":0,"l":0,"o":0,"pc":0}"#;

        let quote: Quote = serde_json::from_str(body).unwrap();

        assert_eq!(quote.current, 5.5);
        assert_eq!(quote.percent_change, None);
    }
}
