use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub doctor_directory_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            doctor_directory_url: "http://localhost:54321/doctors".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_directory_url(url: &str) -> Self {
        Self {
            doctor_directory_url: url.to_string(),
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::with_directory_url(self.doctor_directory_url.clone())
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// A doctor record as the directory endpoint serves it.
pub struct TestDoctor {
    pub id: String,
    pub name: String,
    pub fees: String,
    pub experience: String,
    pub video_consult: bool,
    pub in_clinic: bool,
    pub specialities: Vec<String>,
}

impl TestDoctor {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            fees: "₹500".to_string(),
            experience: "10 Years of experience".to_string(),
            video_consult: true,
            in_clinic: true,
            specialities: vec!["General Physician".to_string()],
        }
    }

    pub fn fees(mut self, fees: &str) -> Self {
        self.fees = fees.to_string();
        self
    }

    pub fn experience(mut self, experience: &str) -> Self {
        self.experience = experience.to_string();
        self
    }

    pub fn modes(mut self, video_consult: bool, in_clinic: bool) -> Self {
        self.video_consult = video_consult;
        self.in_clinic = in_clinic;
        self
    }

    pub fn specialities(mut self, names: &[&str]) -> Self {
        self.specialities = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn to_json(&self) -> Value {
        let initials: String = self
            .name
            .trim_start_matches("Dr. ")
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect();

        json!({
            "id": self.id,
            "name": self.name,
            "name_initials": initials,
            "photo": null,
            "doctor_introduction": format!("{}, MBBS, practising in Bangalore", self.name),
            "specialities": self.specialities.iter().map(|n| json!({ "name": n })).collect::<Vec<_>>(),
            "fees": self.fees,
            "experience": self.experience,
            "languages": ["English", "Hindi"],
            "clinic": {
                "name": "Sunrise Clinic",
                "address": {
                    "locality": "Indiranagar",
                    "city": "Bangalore",
                    "address_line1": "12 Main Road",
                    "location": "12.97,77.64",
                    "logo_url": ""
                }
            },
            "video_consult": self.video_consult,
            "in_clinic": self.in_clinic
        })
    }
}

pub struct MockDirectoryResponses;

impl MockDirectoryResponses {
    pub fn doctors(doctors: &[TestDoctor]) -> Value {
        Value::Array(doctors.iter().map(TestDoctor::to_json).collect())
    }

    /// Two doctors that disagree on every filter and sort dimension.
    pub fn alice_and_bob() -> Value {
        Self::doctors(&[
            TestDoctor::new("1", "Dr. Alice")
                .fees("₹500")
                .experience("10 Years")
                .modes(true, false)
                .specialities(&["Dermatologist"]),
            TestDoctor::new("2", "Dr. Bob")
                .fees("₹300")
                .experience("20 Years")
                .modes(false, true)
                .specialities(&["Dentist"]),
        ])
    }

    pub fn sample_directory() -> Value {
        Self::doctors(&[
            TestDoctor::new("101", "Dr. Anita Rao")
                .fees("₹ 700")
                .experience("13 Years of experience")
                .modes(true, true)
                .specialities(&["Dermatologist", "Cosmetologist"]),
            TestDoctor::new("102", "Dr. Rahul Mehta")
                .fees("₹450")
                .experience("8 Years of experience")
                .modes(false, true)
                .specialities(&["Dentist"]),
            TestDoctor::new("103", "Dr. Anil Kumar")
                .fees("₹450")
                .experience("21 Years of experience")
                .modes(true, false)
                .specialities(&["General Physician", "Dermatologist"]),
            TestDoctor::new("104", "Dr. Ananya Iyer")
                .fees("Free")
                .experience("Fresher")
                .modes(true, true)
                .specialities(&["Gynaecologist and Obstetrician"]),
            TestDoctor::new("105", "Dr. Sameer Khan")
                .fees("₹1200")
                .experience("30 Years of experience")
                .modes(false, true)
                .specialities(&["Orthopaedic"]),
        ])
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "error": {
                "message": message
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default().to_app_config();
        assert_eq!(config.doctor_directory_url, "http://localhost:54321/doctors");
    }

    #[test]
    fn test_doctor_json_shape() {
        let doctor = TestDoctor::new("7", "Dr. Jane Doe").specialities(&["Dentist", "Orthodontist"]);
        let value = doctor.to_json();

        assert_eq!(value["name_initials"], "JD");
        assert_eq!(value["specialities"][1]["name"], "Orthodontist");
        assert_eq!(value["clinic"]["address"]["locality"], "Indiranagar");
    }

    #[test]
    fn test_sample_directory_size() {
        let value = MockDirectoryResponses::sample_directory();
        assert_eq!(value.as_array().map(Vec::len), Some(5));
    }
}
