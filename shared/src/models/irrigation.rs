//! Irrigation decision models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Binary irrigation recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IrrigationAlert {
    #[serde(rename = "Irrigation is needed in the field.")]
    NeedsIrrigation,
    #[serde(rename = "Irrigation is not needed in the field.")]
    NoIrrigationNeeded,
}

impl IrrigationAlert {
    pub fn message(&self) -> &'static str {
        match self {
            IrrigationAlert::NeedsIrrigation => "Irrigation is needed in the field.",
            IrrigationAlert::NoIrrigationNeeded => "Irrigation is not needed in the field.",
        }
    }

    pub fn is_needed(&self) -> bool {
        matches!(self, IrrigationAlert::NeedsIrrigation)
    }
}

impl std::fmt::Display for IrrigationAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Per-depth and combined soil moisture averages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilMoistureSummary {
    pub average_4cm: f64,
    pub average_14cm: f64,
    pub combined: f64,
}

/// Output of the decision engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IrrigationDecision {
    /// Satellite mean minus combined soil moisture; informational only
    pub composite_signal: f64,
    pub alert: IrrigationAlert,
}

/// Result of one irrigation evaluation, returned to the caller as-is
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateResult {
    pub average_ndwi_value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub average_soil_moisture_4cm: f64,
    pub average_soil_moisture_14cm: f64,
    pub average_soil_moisture: f64,
    pub value_of_c: f64,
    pub irrigation_alert: IrrigationAlert,
}

impl AggregateResult {
    pub fn assemble(
        satellite_mean: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        soil: SoilMoistureSummary,
        decision: IrrigationDecision,
    ) -> Self {
        Self {
            average_ndwi_value: satellite_mean,
            start_date,
            end_date,
            average_soil_moisture_4cm: soil.average_4cm,
            average_soil_moisture_14cm: soil.average_14cm,
            average_soil_moisture: soil.combined,
            value_of_c: decision.composite_signal,
            irrigation_alert: decision.alert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_serializes_as_sentence() {
        let json = serde_json::to_string(&IrrigationAlert::NeedsIrrigation).unwrap();
        assert_eq!(json, "\"Irrigation is needed in the field.\"");
        let json = serde_json::to_string(&IrrigationAlert::NoIrrigationNeeded).unwrap();
        assert_eq!(json, "\"Irrigation is not needed in the field.\"");
    }

    #[test]
    fn result_uses_wire_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let result = AggregateResult::assemble(
            0.6,
            date,
            date,
            SoilMoistureSummary {
                average_4cm: 0.3,
                average_14cm: 0.3,
                combined: 0.3,
            },
            IrrigationDecision {
                composite_signal: 0.3,
                alert: IrrigationAlert::NoIrrigationNeeded,
            },
        );

        let value = serde_json::to_value(&result).unwrap();
        for key in [
            "average_ndwi_value",
            "start_date",
            "end_date",
            "average_soil_moisture_4cm",
            "average_soil_moisture_14cm",
            "average_soil_moisture",
            "value_of_c",
            "irrigation_alert",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["start_date"], "2024-05-01");
    }
}
