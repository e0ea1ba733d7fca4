// Donation data models
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::GeoPoint;

/// Plasma types offered on the request form
pub const PLASMA_TYPES: [&str; 3] = ["Convalescent Plasma", "Standard Plasma", "Other"];

/// A patient's request for plasma
///
/// Field names serialize in camelCase to match the stored documents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationRequest {
    /// Document id; empty until stored
    #[serde(skip_serializing)]
    pub id: String,
    pub patient_name: String,
    pub contact_info: String,
    pub blood_group: String,
    /// Human-readable address
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub patient_condition: String,
    pub plasma_type: String,
    pub special_instructions: String,
    /// Download URL of the uploaded report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covid_report_uri: Option<String>,
}

/// Fields the request form requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    BloodGroup,
    Location,
    PatientCondition,
    PatientName,
    ContactInfo,
    PlasmaType,
    CovidReport,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields(Vec<RequestField>),
}

impl DonationRequest {
    pub fn coordinates(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Fill location fields from a resolved fix
    pub fn set_location(&mut self, point: GeoPoint, address: Option<String>) {
        self.latitude = point.latitude;
        self.longitude = point.longitude;
        if let Some(address) = address {
            self.location = address;
        }
    }

    /// Check that every required field is present
    /// Special instructions are optional
    pub fn validate(&self) -> Result<(), ValidationError> {
        let checks = [
            (RequestField::BloodGroup, self.blood_group.is_empty()),
            (RequestField::Location, self.location.is_empty()),
            (RequestField::PatientCondition, self.patient_condition.is_empty()),
            (RequestField::PatientName, self.patient_name.is_empty()),
            (RequestField::ContactInfo, self.contact_info.is_empty()),
            (RequestField::PlasmaType, self.plasma_type.is_empty()),
            (RequestField::CovidReport, self.covid_report_uri.is_none()),
        ];

        let missing: Vec<RequestField> = checks
            .into_iter()
            .filter_map(|(field, is_missing)| is_missing.then_some(field))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

/// A location where donors can give plasma
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationCenter {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl DonationCenter {
    pub fn coordinates(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> DonationRequest {
        DonationRequest {
            patient_name: "A. Patient".to_string(),
            contact_info: "07700 900123".to_string(),
            blood_group: "O+".to_string(),
            location: "Middlesbrough".to_string(),
            latitude: 54.57,
            longitude: -1.23,
            patient_condition: "Stable".to_string(),
            plasma_type: PLASMA_TYPES[0].to_string(),
            covid_report_uri: Some("https://example.invalid/report.jpg".to_string()),
            ..DonationRequest::default()
        }
    }

    #[test]
    fn test_complete_request_validates() {
        assert_eq!(complete_request().validate(), Ok(()));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let request = DonationRequest {
            blood_group: String::new(),
            covid_report_uri: None,
            ..complete_request()
        };

        let err = request.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![RequestField::BloodGroup, RequestField::CovidReport])
        );
        assert_eq!(err.to_string(), "Please fill in all fields.");
    }

    #[test]
    fn test_serializes_document_field_names() {
        let value = serde_json::to_value(complete_request()).unwrap();

        assert_eq!(value["patientName"], "A. Patient");
        assert_eq!(value["bloodGroup"], "O+");
        assert!(value.get("id").is_none());
        assert!(value.get("covidReportUri").is_some());
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let request: DonationRequest =
            serde_json::from_str(r#"{"patientName":"B","latitude":1.5}"#).unwrap();

        assert_eq!(request.patient_name, "B");
        assert_eq!(request.coordinates(), GeoPoint::new(1.5, 0.0));
        assert!(request.covid_report_uri.is_none());
    }

    #[test]
    fn test_set_location_keeps_address_when_geocoding_failed() {
        let mut request = complete_request();
        request.set_location(GeoPoint::new(10.0, 20.0), None);

        assert_eq!(request.coordinates(), GeoPoint::new(10.0, 20.0));
        assert_eq!(request.location, "Middlesbrough");
    }

    #[test]
    fn test_center_coordinates() {
        let center = DonationCenter {
            name: "Teesside Donor Centre".to_string(),
            latitude: 54.56,
            longitude: -1.31,
            address: "Stockton".to_string(),
        };
        assert_eq!(center.coordinates(), GeoPoint::new(54.56, -1.31));
    }
}
