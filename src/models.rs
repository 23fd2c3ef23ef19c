use serde::{Deserialize, Serialize};

/// A Farmer Producer Organization profile as returned by the platform API.
///
/// Compliance documents come in triples: the recorded number/identifier, a
/// collected flag, and an image URL for the scanned copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fpo {
    pub id: String,
    pub fpo_id: String,
    pub constitution: Option<String>,
    pub entity_name: String,
    #[serde(default)]
    pub no_of_farmers: Option<i64>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    #[serde(default)]
    pub area_of_operation: Option<f64>,
    pub establishment_year: Option<String>,
    #[serde(default)]
    pub major_crop_produced: Vec<String>,
    #[serde(default)]
    pub previous_year_turnover: Option<f64>,
    pub contact_person_name: Option<String>,
    pub contact_person_phone: Option<String>,
    pub pan_no: Option<String>,
    #[serde(default)]
    pub is_pan_copy_collected: bool,
    pub pan_image: Option<String>,
    #[serde(default)]
    pub is_incorporation_doc_collected: bool,
    pub incorporation_doc_img: Option<String>,
    #[serde(default)]
    pub is_registration_no_collected: bool,
    pub registration_no: Option<String>,
    pub registration_no_img: Option<String>,
    #[serde(default)]
    pub is_director_shareholder_list_collected: bool,
    pub director_shareholder_list_image: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// An individual farmer record.
///
/// The nested sub-objects are only populated by older API deployments; newer
/// ones link KYC data through separate endpoints instead. Both shapes parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: String,
    pub farmer_id: String,
    pub phone_no: Option<String>,
    pub referral_id: Option<String>,
    pub name: Option<String>,
    pub village: Option<String>,
    pub status: Option<i32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub kyc: Option<KycSummary>,
    #[serde(default)]
    pub farm_info: Option<FarmInfo>,
    #[serde(default)]
    pub land_info: Option<LandInfo>,
    #[serde(default)]
    pub score_card: Option<ScoreCard>,
    #[serde(default)]
    pub credit_report: Option<CreditReport>,
}

/// Inline KYC summary embedded in legacy farmer responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycSummary {
    pub aadhaar_number: Option<String>,
    pub aadhaar_image: Option<String>,
    pub pan_number: Option<String>,
    pub pan_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmInfo {
    pub farm_type: Option<String>,
    #[serde(default)]
    pub crops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandInfo {
    pub area: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub risk_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditReport {
    pub summary: Option<String>,
}

/// KYC history entry linking a farmer to verification document versions.
///
/// The version ids are foreign references into the POI/POA stores; either may
/// be null when that document has not been captured yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycRecord {
    pub farmer_id: String,
    pub poi_version_id: Option<String>,
    pub poa_version_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Proof-of-identity verification document.
///
/// Each extracted attribute carries a `_cs` confidence score from the
/// document-reading pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofOfIdentity {
    pub id: String,
    pub name: Option<String>,
    pub name_cs: Option<f64>,
    pub date_of_birth: Option<String>,
    pub date_of_birth_cs: Option<f64>,
    pub gender: Option<String>,
    pub gender_cs: Option<f64>,
    pub father_name: Option<String>,
    pub father_name_cs: Option<f64>,
    pub id_number: Option<String>,
    pub id_number_cs: Option<f64>,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub verification_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Proof-of-address verification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofOfAddress {
    pub id: String,
    pub name: Option<String>,
    pub name_cs: Option<f64>,
    pub care_of: Option<String>,
    pub care_of_cs: Option<f64>,
    pub house_number: Option<String>,
    pub house_number_cs: Option<f64>,
    pub street: Option<String>,
    pub street_cs: Option<f64>,
    pub locality: Option<String>,
    pub locality_cs: Option<f64>,
    pub village_town: Option<String>,
    pub village_town_cs: Option<f64>,
    pub district: Option<String>,
    pub district_cs: Option<f64>,
    pub state: Option<String>,
    pub state_cs: Option<f64>,
    pub pincode: Option<String>,
    pub pincode_cs: Option<f64>,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub verification_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A loan application submitted by a farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

/// Wrapper envelope used only by the applications endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationsResponse {
    #[serde(default)]
    pub data: Vec<Application>,
}

/// Format an API timestamp for display. Falls back to the raw string when the
/// value is not RFC 3339.
pub fn display_date(timestamp: Option<&str>) -> String {
    match timestamp {
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "N/A".to_string(),
    }
}

/// Render an optional field the way the admin screens do: value or "N/A".
pub fn display_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

pub fn display_yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farmer_parses_without_nested_sections() {
        let json = r#"{
            "id": "abc",
            "farmer_id": "FARM-9",
            "phone_no": "9999999999",
            "referral_id": null,
            "name": null,
            "village": "Kothapalli",
            "status": 2,
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T10:00:00Z"
        }"#;

        let farmer: Farmer = serde_json::from_str(json).unwrap();
        assert_eq!(farmer.farmer_id, "FARM-9");
        assert!(farmer.kyc.is_none());
        assert!(farmer.farm_info.is_none());
    }

    #[test]
    fn test_applications_envelope_field_renames() {
        let json = r#"{"data": [{"_id": "app-1", "status": "Approved", "createdAt": "2024-01-05T00:00:00Z"}]}"#;
        let response: ApplicationsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].id, "app-1");
        assert_eq!(response.data[0].status, "Approved");
    }

    #[test]
    fn test_applications_envelope_missing_data() {
        let response: ApplicationsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_display_date_formats_rfc3339() {
        assert_eq!(display_date(Some("2024-03-01T10:00:00Z")), "2024-03-01");
        assert_eq!(display_date(Some("yesterday")), "yesterday");
        assert_eq!(display_date(None), "N/A");
    }

    #[test]
    fn test_display_or_na() {
        assert_eq!(display_or_na(Some("value")), "value");
        assert_eq!(display_or_na(Some("")), "N/A");
        assert_eq!(display_or_na(None), "N/A");
    }
}
