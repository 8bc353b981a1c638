use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{
    get_config, MAX_ADMIN_FEE_PERCENT, MAX_ANNUAL_RATE_PERCENT, MIN_ASSET_VALUE, MIN_TERM_MONTHS,
};
use crate::consortium::ConsortiumInput;
use crate::financing::FinancingInput;
use crate::format::format_integer;
use crate::types::{AssetType, Money, Months, Percent};

/// Field name → human-readable message. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Consórcio form as typed by the user; any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsortiumForm {
    pub asset_value: Option<Money>,
    pub bid_amount: Option<Money>,
    pub term_months: Option<i64>,
    pub administrative_fee_percent: Option<Percent>,
}

/// Financing form as typed by the user; any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingForm {
    pub asset_value: Option<Money>,
    pub down_payment: Option<Money>,
    pub term_months: Option<i64>,
    pub annual_rate_percent: Option<Percent>,
}

pub fn validate_consortium_input(form: &ConsortiumForm, asset_type: AssetType) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    check_asset_value(&mut errors, form.asset_value, asset_type);

    if let Some(bid) = form.bid_amount {
        if bid < Decimal::ZERO {
            errors.insert("bid_amount", "Lance não pode ser negativo");
        } else if exceeds_asset_value(bid, form.asset_value) {
            errors.insert("bid_amount", "Lance deve ser menor que o valor do bem");
        }
    }

    check_term(&mut errors, form.term_months, asset_type);

    match form.administrative_fee_percent {
        Some(fee) if fee > MAX_ADMIN_FEE_PERCENT => {
            errors.insert(
                "administrative_fee_percent",
                format!("Taxa administrativa não pode ser maior que {MAX_ADMIN_FEE_PERCENT}%"),
            );
        }
        Some(fee) if fee >= Decimal::ZERO => {}
        _ => errors.insert(
            "administrative_fee_percent",
            "Taxa administrativa é obrigatória e não pode ser negativa",
        ),
    }

    errors
}

pub fn validate_financing_input(form: &FinancingForm, asset_type: AssetType) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    check_asset_value(&mut errors, form.asset_value, asset_type);

    if let Some(down) = form.down_payment {
        if down < Decimal::ZERO {
            errors.insert("down_payment", "Entrada não pode ser negativa");
        } else if exceeds_asset_value(down, form.asset_value) {
            errors.insert("down_payment", "Entrada deve ser menor que o valor do bem");
        }
    }

    check_term(&mut errors, form.term_months, asset_type);

    match form.annual_rate_percent {
        Some(rate) if rate > MAX_ANNUAL_RATE_PERCENT => {
            errors.insert(
                "annual_rate_percent",
                format!("Juros anuais não podem ser maiores que {MAX_ANNUAL_RATE_PERCENT}%"),
            );
        }
        Some(rate) if rate >= Decimal::ZERO => {}
        _ => errors.insert(
            "annual_rate_percent",
            "Juros anuais são obrigatórios e não podem ser negativos",
        ),
    }

    errors
}

impl ConsortiumForm {
    /// Validate and promote to the fully-specified input.
    pub fn into_input(self, asset_type: AssetType) -> Result<ConsortiumInput, ValidationErrors> {
        let errors = validate_consortium_input(&self, asset_type);
        if !errors.is_empty() {
            return Err(errors);
        }
        match (self.asset_value, to_months(self.term_months), self.administrative_fee_percent) {
            (Some(asset_value), Some(term_months), Some(administrative_fee_percent)) => {
                Ok(ConsortiumInput {
                    asset_value,
                    bid_amount: self.bid_amount.unwrap_or_default(),
                    term_months,
                    administrative_fee_percent,
                    asset_type,
                })
            }
            _ => Err(errors),
        }
    }
}

impl FinancingForm {
    /// Validate and promote to the fully-specified input.
    pub fn into_input(self, asset_type: AssetType) -> Result<FinancingInput, ValidationErrors> {
        let errors = validate_financing_input(&self, asset_type);
        if !errors.is_empty() {
            return Err(errors);
        }
        match (self.asset_value, to_months(self.term_months), self.annual_rate_percent) {
            (Some(asset_value), Some(term_months), Some(annual_rate_percent)) => Ok(FinancingInput {
                asset_value,
                down_payment: self.down_payment.unwrap_or_default(),
                term_months,
                annual_rate_percent,
                asset_type,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&ConsortiumInput> for ConsortiumForm {
    fn from(input: &ConsortiumInput) -> Self {
        ConsortiumForm {
            asset_value: Some(input.asset_value),
            bid_amount: Some(input.bid_amount),
            term_months: Some(i64::from(input.term_months)),
            administrative_fee_percent: Some(input.administrative_fee_percent),
        }
    }
}

impl From<&FinancingInput> for FinancingForm {
    fn from(input: &FinancingInput) -> Self {
        FinancingForm {
            asset_value: Some(input.asset_value),
            down_payment: Some(input.down_payment),
            term_months: Some(i64::from(input.term_months)),
            annual_rate_percent: Some(input.annual_rate_percent),
        }
    }
}

fn check_asset_value(errors: &mut ValidationErrors, value: Option<Money>, asset_type: AssetType) {
    let max = get_config(asset_type).suggested_max_value;
    match value {
        Some(v) if v <= Decimal::ZERO => {
            errors.insert("asset_value", "Valor do bem é obrigatório e deve ser maior que zero")
        }
        Some(v) if v < MIN_ASSET_VALUE => {
            errors.insert("asset_value", "Valor do bem deve ser no mínimo R$ 1.000,00")
        }
        Some(v) if v > max => errors.insert(
            "asset_value",
            format!("Valor sugerido máximo é R$ {}", format_integer(max)),
        ),
        Some(_) => {}
        None => errors.insert("asset_value", "Valor do bem é obrigatório e deve ser maior que zero"),
    }
}

fn check_term(errors: &mut ValidationErrors, term: Option<i64>, asset_type: AssetType) {
    let ceiling = get_config(asset_type).term_ceiling_months;
    match term {
        Some(t) if t <= 0 => {
            errors.insert("term_months", "Prazo é obrigatório e deve ser maior que zero")
        }
        Some(t) if t < i64::from(MIN_TERM_MONTHS) => {
            errors.insert("term_months", format!("Prazo mínimo é de {MIN_TERM_MONTHS} meses"))
        }
        Some(t) if t > i64::from(ceiling) => {
            errors.insert("term_months", format!("Prazo máximo é de {ceiling} meses"))
        }
        Some(_) => {}
        None => errors.insert("term_months", "Prazo é obrigatório e deve ser maior que zero"),
    }
}

/// Lump sums are only checked against a usable asset value.
fn exceeds_asset_value(amount: Money, asset_value: Option<Money>) -> bool {
    matches!(asset_value, Some(v) if v > Decimal::ZERO && amount >= v)
}

fn to_months(term: Option<i64>) -> Option<Months> {
    term.and_then(|t| Months::try_from(t).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn valid_consortium() -> ConsortiumForm {
        ConsortiumForm {
            asset_value: Some(dec!(50000)),
            bid_amount: Some(dec!(5000)),
            term_months: Some(60),
            administrative_fee_percent: Some(dec!(15)),
        }
    }

    fn valid_financing() -> FinancingForm {
        FinancingForm {
            asset_value: Some(dec!(50000)),
            down_payment: Some(dec!(5000)),
            term_months: Some(60),
            annual_rate_percent: Some(dec!(12)),
        }
    }

    #[test]
    fn test_valid_forms_have_no_errors() {
        assert!(validate_consortium_input(&valid_consortium(), AssetType::Car).is_empty());
        assert!(validate_financing_input(&valid_financing(), AssetType::Car).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = validate_consortium_input(&ConsortiumForm::default(), AssetType::Car);
        assert_eq!(errors.len(), 3);
        assert!(errors.get("asset_value").is_some());
        assert!(errors.get("term_months").is_some());
        assert!(errors.get("administrative_fee_percent").is_some());
        // bid is optional
        assert!(errors.get("bid_amount").is_none());

        let errors = validate_financing_input(&FinancingForm::default(), AssetType::Car);
        assert_eq!(errors.len(), 3);
        assert!(errors.get("annual_rate_percent").is_some());
        assert!(errors.get("down_payment").is_none());
    }

    #[test]
    fn test_asset_value_bounds() {
        let mut form = valid_consortium();
        form.asset_value = Some(dec!(999.99));
        let errors = validate_consortium_input(&form, AssetType::Car);
        assert_eq!(
            errors.get("asset_value"),
            Some("Valor do bem deve ser no mínimo R$ 1.000,00")
        );

        form.asset_value = Some(dec!(300001));
        let errors = validate_consortium_input(&form, AssetType::Car);
        assert_eq!(errors.get("asset_value"), Some("Valor sugerido máximo é R$ 300.000"));

        // The same value is fine for property
        assert!(validate_consortium_input(&form, AssetType::Property).is_empty());

        form.asset_value = Some(dec!(0));
        let errors = validate_consortium_input(&form, AssetType::Car);
        assert_eq!(
            errors.get("asset_value"),
            Some("Valor do bem é obrigatório e deve ser maior que zero")
        );
    }

    #[test]
    fn test_term_boundaries_car() {
        let mut form = valid_financing();
        for (term, ok) in [(11, false), (12, true), (60, true), (61, false)] {
            form.term_months = Some(term);
            let errors = validate_financing_input(&form, AssetType::Car);
            assert_eq!(errors.is_empty(), ok, "term {term}: {errors}");
        }
    }

    #[test]
    fn test_term_boundaries_property() {
        let mut form = ConsortiumForm {
            asset_value: Some(dec!(500000)),
            ..valid_consortium()
        };
        for (term, ok) in [(11, false), (12, true), (360, true), (361, false)] {
            form.term_months = Some(term);
            let errors = validate_consortium_input(&form, AssetType::Property);
            assert_eq!(errors.is_empty(), ok, "term {term}: {errors}");
        }
    }

    #[test]
    fn test_term_messages() {
        let mut form = valid_consortium();
        form.term_months = Some(-3);
        assert_eq!(
            validate_consortium_input(&form, AssetType::Car).get("term_months"),
            Some("Prazo é obrigatório e deve ser maior que zero")
        );
        form.term_months = Some(6);
        assert_eq!(
            validate_consortium_input(&form, AssetType::Car).get("term_months"),
            Some("Prazo mínimo é de 12 meses")
        );
        form.term_months = Some(72);
        assert_eq!(
            validate_consortium_input(&form, AssetType::Car).get("term_months"),
            Some("Prazo máximo é de 60 meses")
        );
    }

    #[test]
    fn test_bid_cross_field_rules() {
        let mut form = valid_consortium();
        form.bid_amount = Some(dec!(-1));
        assert_eq!(
            validate_consortium_input(&form, AssetType::Car).get("bid_amount"),
            Some("Lance não pode ser negativo")
        );

        form.bid_amount = Some(dec!(50000));
        assert_eq!(
            validate_consortium_input(&form, AssetType::Car).get("bid_amount"),
            Some("Lance deve ser menor que o valor do bem")
        );

        form.bid_amount = Some(dec!(49999.99));
        assert!(validate_consortium_input(&form, AssetType::Car).is_empty());
    }

    #[test]
    fn test_down_payment_cross_field_rules() {
        let mut form = valid_financing();
        form.down_payment = Some(dec!(-0.01));
        assert_eq!(
            validate_financing_input(&form, AssetType::Car).get("down_payment"),
            Some("Entrada não pode ser negativa")
        );

        form.down_payment = Some(dec!(60000));
        assert_eq!(
            validate_financing_input(&form, AssetType::Car).get("down_payment"),
            Some("Entrada deve ser menor que o valor do bem")
        );
    }

    #[test]
    fn test_down_payment_unchecked_without_asset_value() {
        let form = FinancingForm {
            asset_value: None,
            down_payment: Some(dec!(1000000)),
            ..valid_financing()
        };
        let errors = validate_financing_input(&form, AssetType::Car);
        assert!(errors.get("down_payment").is_none());
        assert!(errors.get("asset_value").is_some());
    }

    #[test]
    fn test_fee_and_rate_ranges() {
        let mut c = valid_consortium();
        c.administrative_fee_percent = Some(dec!(0));
        assert!(validate_consortium_input(&c, AssetType::Car).is_empty());
        c.administrative_fee_percent = Some(dec!(100));
        assert!(validate_consortium_input(&c, AssetType::Car).is_empty());
        c.administrative_fee_percent = Some(dec!(100.01));
        assert_eq!(
            validate_consortium_input(&c, AssetType::Car).get("administrative_fee_percent"),
            Some("Taxa administrativa não pode ser maior que 100%")
        );
        c.administrative_fee_percent = Some(dec!(-1));
        assert_eq!(
            validate_consortium_input(&c, AssetType::Car).get("administrative_fee_percent"),
            Some("Taxa administrativa é obrigatória e não pode ser negativa")
        );

        let mut f = valid_financing();
        f.annual_rate_percent = Some(dec!(0));
        assert!(validate_financing_input(&f, AssetType::Car).is_empty());
        f.annual_rate_percent = Some(dec!(50));
        assert!(validate_financing_input(&f, AssetType::Car).is_empty());
        f.annual_rate_percent = Some(dec!(50.5));
        assert_eq!(
            validate_financing_input(&f, AssetType::Car).get("annual_rate_percent"),
            Some("Juros anuais não podem ser maiores que 50%")
        );
    }

    #[test]
    fn test_into_input_promotes_valid_form() {
        let form = ConsortiumForm {
            bid_amount: None,
            ..valid_consortium()
        };
        let input = form.into_input(AssetType::Car).unwrap();
        assert_eq!(
            input,
            ConsortiumInput {
                asset_value: dec!(50000),
                bid_amount: Decimal::ZERO,
                term_months: 60,
                administrative_fee_percent: dec!(15),
                asset_type: AssetType::Car,
            }
        );

        let input = valid_financing().into_input(AssetType::Property).unwrap();
        assert_eq!(input.down_payment, dec!(5000));
        assert_eq!(input.asset_type, AssetType::Property);
    }

    #[test]
    fn test_into_input_returns_errors() {
        let form = ConsortiumForm {
            term_months: Some(500),
            ..valid_consortium()
        };
        let errors = form.into_input(AssetType::Car).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("term_months"), Some("Prazo máximo é de 60 meses"));
    }

    #[test]
    fn test_errors_serialise_as_flat_map() {
        let errors = validate_financing_input(&FinancingForm::default(), AssetType::Car);
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json.is_object());
        assert_eq!(
            json["term_months"],
            "Prazo é obrigatório e deve ser maior que zero"
        );
    }

    #[test]
    fn test_display_joins_fields_in_order() {
        let mut errors = ValidationErrors::default();
        errors.insert("term_months", "b");
        errors.insert("asset_value", "a");
        assert_eq!(errors.to_string(), "asset_value: a; term_months: b");
    }
}
