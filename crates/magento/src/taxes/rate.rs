//! Tax rates and their Magento REST document (`POST /V1/taxRates`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use whippet_core::validate::{in_range, len_between, max_len_opt};
use whippet_core::{DomainError, DomainResult, EntityId, Validate, ValueObject};

use crate::entity::{MagentoId, impl_magento_entity, validate_country_id};

pub const TAX_RATE_CODE_MAX: usize = 255;
/// Width of Magento's `tax_calculation_rate.tax_postcode` column.
pub const TAX_POSTCODE_MAX: usize = 21;
/// Postcode value meaning "any postcode".
pub const ANY_POSTCODE: &str = "*";

/// Store-view specific label of a tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRateTitle {
    pub store_id: MagentoId,
    pub value: String,
}

impl ValueObject for TaxRateTitle {}

/// Inclusive numeric ZIP range (`zip_is_range = 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZipRange {
    pub from: u32,
    pub to: u32,
}

impl ValueObject for ZipRange {}

impl ZipRange {
    pub fn contains(&self, zip: u32) -> bool {
        (self.from..=self.to).contains(&zip)
    }
}

pub trait TaxRateRecord {
    fn tax_rate_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn tax_country_id(&self) -> &str;
    fn tax_region_id(&self) -> Option<MagentoId>;
    fn region_name(&self) -> Option<&str>;
    fn tax_postcode(&self) -> Option<&str>;
    fn zip_range(&self) -> Option<ZipRange>;
    fn rate(&self) -> Decimal;
    fn code(&self) -> &str;
    fn titles(&self) -> &[TaxRateTitle];
}

/// A tax rate: a percentage applying to a country, optionally narrowed to a region and
/// a postcode (pattern or numeric range).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub tax_country_id: String,
    pub tax_region_id: Option<MagentoId>,
    pub region_name: Option<String>,
    /// Exact postcode or prefix pattern ending in `*`. Ignored when `zip_range` is set.
    pub tax_postcode: Option<String>,
    pub zip_range: Option<ZipRange>,
    /// Percentage, e.g. `8.25`.
    pub rate: Decimal,
    pub code: String,
    #[serde(default)]
    pub titles: Vec<TaxRateTitle>,
}

impl_magento_entity!(TaxRate, "magento.tax_rate");

impl TaxRate {
    pub fn new(code: impl Into<String>, tax_country_id: impl Into<String>, rate: Decimal) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            tax_country_id: tax_country_id.into(),
            tax_region_id: None,
            region_name: None,
            tax_postcode: None,
            zip_range: None,
            rate,
            code: code.into(),
            titles: Vec::new(),
        }
    }

    pub fn with_region(mut self, tax_region_id: MagentoId, region_name: impl Into<String>) -> Self {
        self.tax_region_id = Some(tax_region_id);
        self.region_name = Some(region_name.into());
        self
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.tax_postcode = Some(postcode.into());
        self.zip_range = None;
        self
    }

    pub fn with_zip_range(mut self, from: u32, to: u32) -> Self {
        self.zip_range = Some(ZipRange { from, to });
        self.tax_postcode = None;
        self
    }

    pub fn with_title(mut self, store_id: MagentoId, value: impl Into<String>) -> Self {
        self.titles.push(TaxRateTitle {
            store_id,
            value: value.into(),
        });
        self
    }

    /// Postcode as Magento stores it: `"from-to"` for ranges, `"*"` when unrestricted.
    pub fn postcode_pattern(&self) -> String {
        if let Some(range) = self.zip_range {
            return format!("{}-{}", range.from, range.to);
        }
        match self.tax_postcode.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => ANY_POSTCODE.to_string(),
        }
    }

    /// Title shown in `store_id`, falling back to the rate code.
    pub fn title_for_store(&self, store_id: MagentoId) -> &str {
        self.titles
            .iter()
            .find(|t| t.store_id == store_id)
            .map(|t| t.value.as_str())
            .unwrap_or(&self.code)
    }

    /// Whether this rate applies to a destination.
    ///
    /// Country must match; a region restriction must match `region_id`; the postcode
    /// must fall into the range, match the prefix pattern (`"902*"`), or equal the exact
    /// postcode (case-insensitive).
    pub fn applies_to(&self, country_id: &str, region_id: Option<MagentoId>, postcode: &str) -> bool {
        if !self.tax_country_id.eq_ignore_ascii_case(country_id) {
            return false;
        }
        if let Some(required) = self.tax_region_id.filter(|r| *r != 0) {
            if region_id != Some(required) {
                return false;
            }
        }

        let postcode = postcode.trim();
        if let Some(range) = self.zip_range {
            let numeric: String = postcode.chars().take_while(char::is_ascii_digit).collect();
            return numeric.parse::<u32>().is_ok_and(|zip| range.contains(zip));
        }

        let pattern = self.postcode_pattern();
        match pattern.strip_suffix('*') {
            Some(prefix) => postcode
                .to_ascii_uppercase()
                .starts_with(&prefix.to_ascii_uppercase()),
            None => pattern.eq_ignore_ascii_case(postcode),
        }
    }

    /// Serialize to the Magento REST body `{"taxRate":{...}}`.
    ///
    /// Field order is fixed: `id` (only once linked to Magento), `tax_country_id`,
    /// `tax_region_id` (`0` when unrestricted), `region_name` (only when known),
    /// `tax_postcode`, `zip_is_range` (`1`/`0`), `zip_from`/`zip_to` (ranges only),
    /// `rate`, `code`, `titles`.
    pub fn to_magento_json_string(&self) -> DomainResult<String> {
        // Written verbatim: `serde_json::Number` would round through f64.
        let rate = RawValue::from_string(self.rate.normalize().to_string())
            .map_err(|e| DomainError::field("rate", format!("not representable in JSON: {e}")))?;

        let document = MagentoTaxRateDocument {
            tax_rate: MagentoTaxRateBody {
                id: self.magento_id,
                tax_country_id: &self.tax_country_id,
                tax_region_id: self.tax_region_id.unwrap_or(0),
                region_name: self.region_name.as_deref(),
                tax_postcode: self.postcode_pattern(),
                zip_is_range: u8::from(self.zip_range.is_some()),
                zip_from: self.zip_range.map(|r| r.from),
                zip_to: self.zip_range.map(|r| r.to),
                rate,
                code: &self.code,
                titles: self
                    .titles
                    .iter()
                    .map(|t| MagentoTaxRateTitle {
                        store_id: t.store_id,
                        value: &t.value,
                    })
                    .collect(),
            },
        };

        serde_json::to_string(&document)
            .map_err(|e| DomainError::validation(format!("tax rate serialization failed: {e}")))
    }

    /// Parse a Magento tax-rate document, wrapped in `{"taxRate":...}` or bare.
    ///
    /// Magento is loose with scalar types (`"8.2500"` vs `8.25`, `"1"` vs `true`), so
    /// numbers, numeric strings and booleans are all accepted. The result gets a fresh
    /// Whippet id.
    pub fn from_magento_json(json: &str) -> DomainResult<TaxRate> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("invalid tax rate JSON: {e}")))?;
        let body = value
            .get("taxRate")
            .unwrap_or(&value)
            .as_object()
            .ok_or_else(|| DomainError::validation("tax rate JSON must be an object"))?;

        let zip_is_range = read_flag(body, "zip_is_range")?;
        let zip_range = if zip_is_range {
            let from = read_u32(body, "zip_from")?
                .ok_or_else(|| DomainError::field("zip_from", "required when zip_is_range is set"))?;
            let to = read_u32(body, "zip_to")?
                .ok_or_else(|| DomainError::field("zip_to", "required when zip_is_range is set"))?;
            Some(ZipRange { from, to })
        } else {
            None
        };

        let tax_postcode = match (zip_is_range, read_str(body, "tax_postcode")?) {
            (false, Some(p)) if !p.is_empty() && p != ANY_POSTCODE => Some(p),
            _ => None,
        };

        let titles = match body.get("titles") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    let obj = item
                        .as_object()
                        .ok_or_else(|| DomainError::field("titles", "entries must be objects"))?;
                    Ok(TaxRateTitle {
                        store_id: read_u32(obj, "store_id")?.unwrap_or(0),
                        value: read_str(obj, "value")?.unwrap_or_default(),
                    })
                })
                .collect::<DomainResult<Vec<_>>>()?,
            Some(_) => return Err(DomainError::field("titles", "must be an array")),
        };

        Ok(TaxRate {
            id: EntityId::new(),
            magento_id: read_u32(body, "id")?,
            tax_country_id: read_str(body, "tax_country_id")?
                .ok_or_else(|| DomainError::field("tax_country_id", "is required"))?,
            tax_region_id: read_u32(body, "tax_region_id")?.filter(|r| *r != 0),
            region_name: read_str(body, "region_name")?.filter(|s| !s.is_empty()),
            tax_postcode,
            zip_range,
            rate: read_rate(json)?.ok_or_else(|| DomainError::field("rate", "is required"))?,
            code: read_str(body, "code")?
                .ok_or_else(|| DomainError::field("code", "is required"))?,
            titles,
        })
    }
}

#[derive(Serialize)]
struct MagentoTaxRateDocument<'a> {
    #[serde(rename = "taxRate")]
    tax_rate: MagentoTaxRateBody<'a>,
}

#[derive(Serialize)]
struct MagentoTaxRateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<MagentoId>,
    tax_country_id: &'a str,
    tax_region_id: MagentoId,
    #[serde(skip_serializing_if = "Option::is_none")]
    region_name: Option<&'a str>,
    tax_postcode: String,
    zip_is_range: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip_from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip_to: Option<u32>,
    rate: Box<RawValue>,
    code: &'a str,
    titles: Vec<MagentoTaxRateTitle<'a>>,
}

#[derive(Serialize)]
struct MagentoTaxRateTitle<'a> {
    store_id: MagentoId,
    value: &'a str,
}

fn read_str(obj: &Map<String, Value>, key: &str) -> DomainResult<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(DomainError::field(key, "must be a string")),
    }
}

fn read_u32(obj: &Map<String, Value>, key: &str) -> DomainResult<Option<u32>> {
    let parsed = match obj.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        Some(_) => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| DomainError::field(key, "must be a non-negative integer"))
}

/// Raw `rate` token of a wrapped or bare document.
#[derive(Deserialize)]
struct RateToken<'a> {
    #[serde(borrow, default, rename = "taxRate")]
    tax_rate: Option<BareRateToken<'a>>,
    #[serde(borrow, default)]
    rate: Option<&'a RawValue>,
}

#[derive(Deserialize)]
struct BareRateToken<'a> {
    #[serde(borrow, default)]
    rate: Option<&'a RawValue>,
}

/// Reads `rate` from the source text so long decimals keep every digit.
fn read_rate(json: &str) -> DomainResult<Option<Decimal>> {
    let token: RateToken<'_> = serde_json::from_str(json)
        .map_err(|e| DomainError::field("rate", format!("unreadable: {e}")))?;
    let raw = match token.tax_rate {
        Some(body) => body.rate,
        None => token.rate,
    };
    let Some(raw) = raw else {
        return Ok(None);
    };
    let text = raw.get().trim();
    let text = if text.starts_with('"') {
        serde_json::from_str::<String>(text)
            .map_err(|e| DomainError::field("rate", format!("invalid string: {e}")))?
    } else if text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        text.to_string()
    } else {
        return Err(DomainError::field("rate", "must be a number"));
    };
    let text = text.trim();
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text))
        .map(Some)
        .map_err(|e| DomainError::field("rate", format!("invalid decimal: {e}")))
}

fn read_flag(obj: &Map<String, Value>, key: &str) -> DomainResult<bool> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => Ok(n.as_u64().is_some_and(|v| v != 0)),
        Some(Value::String(s)) => match s.trim() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(DomainError::field(key, format!("unexpected flag value {other:?}"))),
        },
        Some(_) => Err(DomainError::field(key, "must be a flag")),
    }
}

impl TaxRateRecord for TaxRate {
    fn tax_rate_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn tax_country_id(&self) -> &str {
        &self.tax_country_id
    }
    fn tax_region_id(&self) -> Option<MagentoId> {
        self.tax_region_id
    }
    fn region_name(&self) -> Option<&str> {
        self.region_name.as_deref()
    }
    fn tax_postcode(&self) -> Option<&str> {
        self.tax_postcode.as_deref()
    }
    fn zip_range(&self) -> Option<ZipRange> {
        self.zip_range
    }
    fn rate(&self) -> Decimal {
        self.rate
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn titles(&self) -> &[TaxRateTitle] {
        &self.titles
    }
}

impl Validate for TaxRate {
    fn validate(&self) -> DomainResult<()> {
        len_between("code", &self.code, 1, TAX_RATE_CODE_MAX)?;
        validate_country_id("tax_country_id", &self.tax_country_id)?;
        in_range("rate", self.rate, Decimal::ZERO, Decimal::ONE_HUNDRED)?;
        max_len_opt("region_name", self.region_name.as_deref(), 255)?;
        max_len_opt("tax_postcode", self.tax_postcode.as_deref(), TAX_POSTCODE_MAX)?;
        if let Some(range) = self.zip_range {
            if range.from > range.to {
                return Err(DomainError::field(
                    "zip_range",
                    format!("from {} is greater than to {}", range.from, range.to),
                ));
            }
        }
        for (i, title) in self.titles.iter().enumerate() {
            len_between("titles.value", &title.value, 1, 255)?;
            if self.titles[..i].iter().any(|t| t.store_id == title.store_id) {
                return Err(DomainError::field(
                    "titles",
                    format!("duplicate title for store {}", title.store_id),
                ));
            }
        }
        Ok(())
    }
}

pub trait ToTaxRate {
    fn to_tax_rate(&self) -> TaxRate;
}

impl<T: TaxRateRecord + ?Sized> ToTaxRate for T {
    fn to_tax_rate(&self) -> TaxRate {
        TaxRate {
            id: self.tax_rate_id(),
            magento_id: self.magento_entity_id(),
            tax_country_id: self.tax_country_id().to_string(),
            tax_region_id: self.tax_region_id(),
            region_name: self.region_name().map(str::to_string),
            tax_postcode: self.tax_postcode().map(str::to_string),
            zip_range: self.zip_range(),
            rate: self.rate(),
            code: self.code().to_string(),
            titles: self.titles().to_vec(),
        }
    }
}
