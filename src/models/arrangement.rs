//! Work arrangements and their rate cards.
//!
//! A role carries one [`WorkArrangementRates`] per [`ArrangementKey`]. The set
//! of arrangements is closed, so tables are indexed by the enum rather than by
//! free-form strings.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_lenient;
use crate::error::EngineError;

/// One of the six fixed employment contexts a role can be priced for.
///
/// Deserializes from either the snake_case key used in the rate card files
/// or the display label shown in the UI.
///
/// # Example
///
/// ```
/// use rate_engine::models::ArrangementKey;
///
/// let key: ArrangementKey = "(On-Site) - UK".parse().unwrap();
/// assert_eq!(key, ArrangementKey::OnSiteUk);
/// assert_eq!(key.label(), "(On-Site) - UK");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrangementKey {
    /// Work from home / remote with flexible hours, UK based.
    #[serde(alias = "(WFM/Remote - Flexible) UK")]
    WfmRemoteFlexibleUk,
    /// Work from home / remote with flexible hours, landed.
    #[serde(alias = "(WFM/Remote - Flexible) Landed")]
    WfmRemoteFlexibleLanded,
    /// On-site in the UK.
    #[serde(alias = "(On-Site) - UK")]
    OnSiteUk,
    /// On-site, landed.
    #[serde(alias = "(On-Site) - Landed")]
    OnSiteLanded,
    /// Fully remote, UK based.
    #[serde(alias = "(Remote) - UK")]
    RemoteUk,
    /// Returner programme, remote, UK based.
    #[serde(alias = "(Returner remote) - UK")]
    ReturnerRemoteUk,
}

impl ArrangementKey {
    /// All arrangements in display order.
    pub const ALL: [ArrangementKey; 6] = [
        ArrangementKey::WfmRemoteFlexibleUk,
        ArrangementKey::WfmRemoteFlexibleLanded,
        ArrangementKey::OnSiteUk,
        ArrangementKey::OnSiteLanded,
        ArrangementKey::RemoteUk,
        ArrangementKey::ReturnerRemoteUk,
    ];

    /// The label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            ArrangementKey::WfmRemoteFlexibleUk => "(WFM/Remote - Flexible) UK",
            ArrangementKey::WfmRemoteFlexibleLanded => "(WFM/Remote - Flexible) Landed",
            ArrangementKey::OnSiteUk => "(On-Site) - UK",
            ArrangementKey::OnSiteLanded => "(On-Site) - Landed",
            ArrangementKey::RemoteUk => "(Remote) - UK",
            ArrangementKey::ReturnerRemoteUk => "(Returner remote) - UK",
        }
    }

    /// The snake_case key used in rate card files.
    pub fn key(self) -> &'static str {
        match self {
            ArrangementKey::WfmRemoteFlexibleUk => "wfm_remote_flexible_uk",
            ArrangementKey::WfmRemoteFlexibleLanded => "wfm_remote_flexible_landed",
            ArrangementKey::OnSiteUk => "on_site_uk",
            ArrangementKey::OnSiteLanded => "on_site_landed",
            ArrangementKey::RemoteUk => "remote_uk",
            ArrangementKey::ReturnerRemoteUk => "returner_remote_uk",
        }
    }
}

impl fmt::Display for ArrangementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ArrangementKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ArrangementKey::ALL
            .into_iter()
            .find(|key| key.label() == trimmed || key.key() == trimmed)
            .ok_or_else(|| EngineError::UnknownArrangement {
                label: s.to_string(),
            })
    }
}

/// Names one of the thirteen fields of a [`WorkArrangementRates`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateField {
    /// Gross daily billing rate.
    DayRate,
    /// Tolerance deduction.
    Tolerance,
    /// Travel and daily allowance deduction.
    Tada,
    /// Near-delivery deduction.
    NearDelivery,
    /// MCB/CRM deduction.
    McbCrm,
    /// DAB Delphi deduction.
    DabDelphi,
    /// DAB Apex deduction.
    DabApex,
    /// DAB Big Data deduction.
    DabBigData,
    /// WS deduction.
    Ws,
    /// Saiven rate (inherited by ACR resources).
    Saiven,
    /// BAU rate (inherited by Reference resources).
    Bau,
    /// Spectrum profit deduction.
    SpectrumProfit,
    /// Day rate after deductions.
    BasicRate,
}

impl RateField {
    /// The eleven fields subtracted from the day rate to reach the basic rate.
    pub const DEDUCTIONS: [RateField; 11] = [
        RateField::Tolerance,
        RateField::Tada,
        RateField::NearDelivery,
        RateField::McbCrm,
        RateField::DabDelphi,
        RateField::DabApex,
        RateField::DabBigData,
        RateField::Ws,
        RateField::Saiven,
        RateField::Bau,
        RateField::SpectrumProfit,
    ];
}

/// The rate card for one role under one work arrangement.
///
/// `basic_rate` is stored as entered; it is only brought back in line with
/// the other fields when the basic rate calculator is run over the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkArrangementRates {
    /// Gross daily billing rate.
    pub day_rate: Decimal,
    /// Tolerance deduction.
    pub tolerance: Decimal,
    /// Travel and daily allowance deduction.
    pub tada: Decimal,
    /// Near-delivery deduction.
    pub near_delivery: Decimal,
    /// MCB/CRM deduction.
    pub mcb_crm: Decimal,
    /// DAB Delphi deduction.
    pub dab_delphi: Decimal,
    /// DAB Apex deduction.
    pub dab_apex: Decimal,
    /// DAB Big Data deduction.
    pub dab_big_data: Decimal,
    /// WS deduction.
    pub ws: Decimal,
    /// Saiven rate.
    pub saiven: Decimal,
    /// BAU rate.
    pub bau: Decimal,
    /// Spectrum profit deduction.
    pub spectrum_profit: Decimal,
    /// Day rate after deductions.
    pub basic_rate: Decimal,
}

impl WorkArrangementRates {
    /// Returns the value of a single field.
    pub fn get(&self, field: RateField) -> Decimal {
        match field {
            RateField::DayRate => self.day_rate,
            RateField::Tolerance => self.tolerance,
            RateField::Tada => self.tada,
            RateField::NearDelivery => self.near_delivery,
            RateField::McbCrm => self.mcb_crm,
            RateField::DabDelphi => self.dab_delphi,
            RateField::DabApex => self.dab_apex,
            RateField::DabBigData => self.dab_big_data,
            RateField::Ws => self.ws,
            RateField::Saiven => self.saiven,
            RateField::Bau => self.bau,
            RateField::SpectrumProfit => self.spectrum_profit,
            RateField::BasicRate => self.basic_rate,
        }
    }
}

/// Raw form values for a [`WorkArrangementRates`] record, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkArrangementForm {
    /// Gross daily billing rate.
    pub day_rate: String,
    /// Tolerance deduction.
    pub tolerance: String,
    /// Travel and daily allowance deduction.
    pub tada: String,
    /// Near-delivery deduction.
    pub near_delivery: String,
    /// MCB/CRM deduction.
    pub mcb_crm: String,
    /// DAB Delphi deduction.
    pub dab_delphi: String,
    /// DAB Apex deduction.
    pub dab_apex: String,
    /// DAB Big Data deduction.
    pub dab_big_data: String,
    /// WS deduction.
    pub ws: String,
    /// Saiven rate.
    pub saiven: String,
    /// BAU rate.
    pub bau: String,
    /// Spectrum profit deduction.
    pub spectrum_profit: String,
    /// Day rate after deductions.
    pub basic_rate: String,
}

impl WorkArrangementForm {
    /// Parses every field, treating blank or non-numeric input as zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rate_engine::models::WorkArrangementForm;
    /// use rust_decimal::Decimal;
    ///
    /// let form = WorkArrangementForm {
    ///     day_rate: "800".to_string(),
    ///     tolerance: "abc".to_string(),
    ///     ..Default::default()
    /// };
    /// let rates = form.to_rates();
    /// assert_eq!(rates.day_rate, Decimal::new(800, 0));
    /// assert_eq!(rates.tolerance, Decimal::ZERO);
    /// ```
    pub fn to_rates(&self) -> WorkArrangementRates {
        WorkArrangementRates {
            day_rate: parse_lenient(&self.day_rate),
            tolerance: parse_lenient(&self.tolerance),
            tada: parse_lenient(&self.tada),
            near_delivery: parse_lenient(&self.near_delivery),
            mcb_crm: parse_lenient(&self.mcb_crm),
            dab_delphi: parse_lenient(&self.dab_delphi),
            dab_apex: parse_lenient(&self.dab_apex),
            dab_big_data: parse_lenient(&self.dab_big_data),
            ws: parse_lenient(&self.ws),
            saiven: parse_lenient(&self.saiven),
            bau: parse_lenient(&self.bau),
            spectrum_profit: parse_lenient(&self.spectrum_profit),
            basic_rate: parse_lenient(&self.basic_rate),
        }
    }

    /// Returns true if any field has been filled in.
    pub fn is_filled(&self) -> bool {
        [
            &self.day_rate,
            &self.tolerance,
            &self.tada,
            &self.near_delivery,
            &self.mcb_crm,
            &self.dab_delphi,
            &self.dab_apex,
            &self.dab_big_data,
            &self.ws,
            &self.saiven,
            &self.bau,
            &self.spectrum_profit,
            &self.basic_rate,
        ]
        .iter()
        .any(|value| !value.trim().is_empty())
    }
}

impl From<&WorkArrangementRates> for WorkArrangementForm {
    fn from(rates: &WorkArrangementRates) -> Self {
        WorkArrangementForm {
            day_rate: rates.day_rate.to_string(),
            tolerance: rates.tolerance.to_string(),
            tada: rates.tada.to_string(),
            near_delivery: rates.near_delivery.to_string(),
            mcb_crm: rates.mcb_crm.to_string(),
            dab_delphi: rates.dab_delphi.to_string(),
            dab_apex: rates.dab_apex.to_string(),
            dab_big_data: rates.dab_big_data.to_string(),
            ws: rates.ws.to_string(),
            saiven: rates.saiven.to_string(),
            bau: rates.bau.to_string(),
            spectrum_profit: rates.spectrum_profit.to_string(),
            basic_rate: rates.basic_rate.to_string(),
        }
    }
}
