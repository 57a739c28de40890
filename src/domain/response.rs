use super::currency::convert_amount_from_gateway_format;
use rust_decimal::Decimal;
use serde::Serialize;

/// Field separator used by the gateway binaries.
pub const FIELD_DELIMITER: char = '!';

/// Status code of a successful gateway call.
pub const SUCCESS_STATUS: &str = "0";

/// Positional record printed by a gateway binary.
///
/// Field 0 is always the status code. The binaries prefix their output with
/// the delimiter; that leading empty field is dropped while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    fields: Vec<String>,
}

impl Response {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Splits one line of binary output into fields.
    ///
    /// Trailing whitespace, including the line terminator, is not part of the
    /// last field.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_end();
        let raw = raw.strip_prefix(FIELD_DELIMITER).unwrap_or(raw);
        Self::new(raw.split(FIELD_DELIMITER).map(str::to_owned).collect())
    }

    pub fn status(&self) -> &str {
        self.field(0).unwrap_or_default()
    }

    pub fn is_error(&self) -> bool {
        self.status() != SUCCESS_STATUS
    }

    /// Error or informational message reported next to the status.
    pub fn message(&self) -> Option<&str> {
        self.field(1).filter(|m| !m.is_empty())
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn checkout_form(&self) -> CheckoutForm<'_> {
        CheckoutForm(self)
    }

    pub fn payment_result(&self) -> PaymentResult<'_> {
        PaymentResult(self)
    }
}

/// Answer of the request binary: status, error and the HTML payment form.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutForm<'a>(&'a Response);

impl<'a> CheckoutForm<'a> {
    pub fn status(&self) -> &'a str {
        self.0.status()
    }

    pub fn error(&self) -> Option<&'a str> {
        self.0.message()
    }

    /// HTML fragment with the card-selection buttons posting to the gateway.
    pub fn html(&self) -> Option<&'a str> {
        self.0.field(2).filter(|html| !html.is_empty())
    }
}

macro_rules! payment_fields {
    ($($index:literal => $name:ident),* $(,)?) => {
        impl<'a> PaymentResult<'a> {
            $(
                pub fn $name(&self) -> Option<&'a str> {
                    self.0.field($index).filter(|v| !v.is_empty())
                }
            )*
        }

        impl Serialize for PaymentResult<'_> {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(None)?;
                $( map.serialize_entry(stringify!($name), &self.$name())?; )*
                map.end()
            }
        }
    };
}

/// Answer of the response binary, read with the SIPS 6.x field layout.
#[derive(Debug, Clone, Copy)]
pub struct PaymentResult<'a>(&'a Response);

payment_fields! {
    0 => code,
    1 => error,
    2 => merchant_id,
    3 => merchant_country,
    4 => amount,
    5 => transaction_id,
    6 => payment_means,
    7 => transmission_date,
    8 => payment_time,
    9 => payment_date,
    10 => response_code,
    11 => payment_certificate,
    12 => authorisation_id,
    13 => currency_code,
    14 => card_number,
    15 => cvv_flag,
    16 => cvv_response_code,
    17 => bank_response_code,
    18 => complementary_code,
    19 => complementary_info,
    20 => return_context,
    21 => caddie,
    22 => receipt_complement,
    23 => merchant_language,
    24 => language,
    25 => customer_id,
    26 => order_id,
    27 => customer_email,
    28 => customer_ip_address,
    29 => capture_day,
    30 => capture_mode,
    31 => data,
}

impl PaymentResult<'_> {
    /// Amount in major units, using the reported currency code.
    pub fn decoded_amount(&self) -> Option<Decimal> {
        let amount: Decimal = self.amount()?.parse().ok()?;
        let currency = self.currency_code()?;
        Some(convert_amount_from_gateway_format(amount, currency))
    }

    /// Bank authorisation accepted (`response_code` "00").
    pub fn is_accepted(&self) -> bool {
        self.response_code() == Some("00")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_record() {
        let response = Response::parse("0!OK!12345");
        assert_eq!(response.status(), "0");
        assert!(!response.is_error());
        assert_eq!(response.message(), Some("OK"));
        assert_eq!(response.field(2), Some("12345"));
        assert_eq!(response.len(), 3);
    }

    #[test]
    fn test_parse_drops_leading_delimiter() {
        let response = Response::parse("!0!!<form></form>!");
        assert_eq!(response.status(), "0");
        assert_eq!(response.message(), None);
        assert_eq!(response.checkout_form().html(), Some("<form></form>"));
        assert_eq!(response.fields().last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_ignores_line_terminator() {
        let response = Response::parse("0!OK\n");
        assert_eq!(response.message(), Some("OK"));
        assert_eq!(response.len(), 2);

        let response = Response::parse("!0!!<form/>!\r\n");
        assert_eq!(response.checkout_form().html(), Some("<form/>"));
        assert_eq!(response.field(3), Some(""));
    }

    #[test]
    fn test_response_serializes_fields() {
        let json = serde_json::to_value(Response::parse("!0!!<form/>!")).unwrap();
        assert_eq!(json, serde_json::json!({ "fields": ["0", "", "<form/>", ""] }));
    }

    #[test]
    fn test_error_status() {
        let response = Response::parse("12!Declined");
        assert!(response.is_error());
        assert_eq!(response.status(), "12");
        assert_eq!(response.checkout_form().error(), Some("Declined"));

        assert!(Response::parse("").is_error());
        assert!(Response::parse("!-1!Error : pathfile not found").is_error());
    }

    #[test]
    fn test_payment_result_layout() {
        let raw = "!0!!014295303911111!fr!1999!123456!CB!20240105101112!101112!20240105!00!1704449472!A1B2C3!978!4974##01!1!4D!00!!!ctx!caddie!!fr!fr!7!ORDER-7!jane@example.com!10.0.0.1!0!AUTHOR_CAPTURE!";
        let response = Response::parse(raw);
        let result = response.payment_result();

        assert_eq!(result.code(), Some("0"));
        assert_eq!(result.error(), None);
        assert_eq!(result.merchant_id(), Some("014295303911111"));
        assert_eq!(result.transaction_id(), Some("123456"));
        assert_eq!(result.currency_code(), Some("978"));
        assert_eq!(result.order_id(), Some("ORDER-7"));
        assert_eq!(result.capture_mode(), Some("AUTHOR_CAPTURE"));
        assert_eq!(result.data(), None);
        assert_eq!(result.decoded_amount(), Some(dec!(19.99)));
        assert!(result.is_accepted());
    }

    #[test]
    fn test_payment_result_short_record() {
        let response = Response::parse("0!!014295303911111!fr!500");
        let result = response.payment_result();
        assert_eq!(result.amount(), Some("500"));
        assert_eq!(result.currency_code(), None);
        assert_eq!(result.decoded_amount(), None);
        assert!(!result.is_accepted());
    }

    #[test]
    fn test_payment_result_serializes_named_fields() {
        let response = Response::parse("0!!m1!fr!1000");
        let json = serde_json::to_value(response.payment_result()).unwrap();
        assert_eq!(json["merchant_id"], "m1");
        assert_eq!(json["amount"], "1000");
        assert!(json["order_id"].is_null());
    }
}
