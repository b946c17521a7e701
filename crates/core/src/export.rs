//! CSV export of the patient list.

use crate::constants::PATIENT_EXPORT_HEADER;
use crate::models::Patient;

/// Renders patients as CSV with an `ID,Name,Age,Phone,Notes` header.
///
/// Rows follow the order of `patients`. Lines end with `\r\n`.
pub fn patients_to_csv<'a>(patients: impl IntoIterator<Item = &'a Patient>) -> String {
    let mut csv = String::new();

    csv.push_str(&PATIENT_EXPORT_HEADER.join(","));
    csv.push_str("\r\n");

    for patient in patients {
        csv.push_str(&format!(
            "{},{},{},{},{}\r\n",
            patient.id,
            escape_csv(&patient.name),
            escape_csv(&patient.age),
            escape_csv(&patient.phone),
            escape_csv(&patient.notes),
        ));
    }

    csv
}

fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatientId;

    fn patient(id: u64, name: &str, notes: &str) -> Patient {
        Patient {
            id: PatientId::new(id).unwrap(),
            name: name.into(),
            age: "30".into(),
            phone: "091111222".into(),
            notes: notes.into(),
        }
    }

    #[test]
    fn test_header_only_for_empty_list() {
        let none: Vec<Patient> = Vec::new();
        assert_eq!(patients_to_csv(&none), "ID,Name,Age,Phone,Notes\r\n");
    }

    #[test]
    fn test_rows_follow_input_order() {
        let patients = [patient(1, "Ahmed Ali", "Regular patient"), patient(2, "Sara Omar", "")];
        let csv = patients_to_csv(&patients);
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(lines[1], "1,Ahmed Ali,30,091111222,Regular patient");
        assert_eq!(lines[2], "2,Sara Omar,30,091111222,");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let patients = [patient(3, "Ali, Omar", "said \"hi\"\nthen left")];
        let csv = patients_to_csv(&patients);

        assert!(csv.contains("3,\"Ali, Omar\",30,091111222,\"said \"\"hi\"\"\nthen left\"\r\n"));
    }

    #[test]
    fn test_escape_leaves_plain_text_alone() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a\"b"), "\"a\"\"b\"");
    }
}
