use crate::models::{Patient, PatientUpdate};
use crate::PatientId;

/// Storage for patient records.
///
/// Identifiers come from a counter that only ever moves forward, so an id is never handed out
/// twice even after the patient it belonged to is deleted.
#[derive(Clone, Debug)]
pub struct PatientRepository {
    patients: Vec<Patient>,
    next_id: PatientId,
}

impl Default for PatientRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientRepository {
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            next_id: PatientId::FIRST,
        }
    }

    /// Appends a new patient under the next free id and returns a copy of it.
    ///
    /// Values are stored exactly as given.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        age: impl Into<String>,
        phone: impl Into<String>,
        notes: impl Into<String>,
    ) -> Patient {
        let patient = Patient {
            id: self.next_id,
            name: name.into(),
            age: age.into(),
            phone: phone.into(),
            notes: notes.into(),
        };
        self.next_id = self.next_id.next();
        self.patients.push(patient.clone());
        patient
    }

    pub fn find_by_id(&self, id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Returns a snapshot of every patient in insertion order.
    pub fn get_all(&self) -> Vec<Patient> {
        self.patients.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter()
    }

    /// Overwrites the supplied fields of a patient in place.
    ///
    /// Returns a copy of the updated record, or `None` if no patient has this id.
    pub fn update(&mut self, id: PatientId, update: PatientUpdate) -> Option<Patient> {
        let patient = self.patients.iter_mut().find(|p| p.id == id)?;

        if let Some(name) = update.name {
            patient.name = name;
        }
        if let Some(age) = update.age {
            patient.age = age;
        }
        if let Some(phone) = update.phone {
            patient.phone = phone;
        }
        if let Some(notes) = update.notes {
            patient.notes = notes;
        }

        Some(patient.clone())
    }

    /// Removes the patient with this id. Returns whether anything was removed.
    pub fn delete(&mut self, id: PatientId) -> bool {
        match self.patients.iter().position(|p| p.id == id) {
            Some(index) => {
                self.patients.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.patients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: u64) -> PatientId {
        PatientId::new(value).unwrap()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut repo = PatientRepository::new();
        let first = repo.create("Ahmed Ali", "30", "091111222", "");
        let second = repo.create("Sara Omar", "25", "092222333", "New patient");

        assert_eq!(first.id, id(1));
        assert_eq!(second.id, id(2));
        assert_eq!(second.notes, "New patient");
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut repo = PatientRepository::new();
        repo.create("Ahmed Ali", "30", "091111222", "");
        let second = repo.create("Sara Omar", "25", "092222333", "");
        assert!(repo.delete(second.id));

        let third = repo.create("Omar Saleh", "41", "093333444", "");
        assert_eq!(third.id, id(3));
    }

    #[test]
    fn test_find_by_id() {
        let mut repo = PatientRepository::new();
        let created = repo.create("Ahmed Ali", "30", "091111222", "");

        assert_eq!(repo.find_by_id(created.id), Some(&created));
        assert_eq!(repo.find_by_id(id(99)), None);
    }

    #[test]
    fn test_get_all_is_a_snapshot_in_insertion_order() {
        let mut repo = PatientRepository::new();
        repo.create("Ahmed Ali", "30", "091111222", "");
        repo.create("Sara Omar", "25", "092222333", "");

        let snapshot = repo.get_all();
        repo.create("Omar Saleh", "41", "093333444", "");

        let names: Vec<&str> = snapshot.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Ahmed Ali", "Sara Omar"]);
        assert_eq!(repo.count(), 3);
    }

    #[test]
    fn test_update_only_touches_supplied_fields() {
        let mut repo = PatientRepository::new();
        let created = repo.create("Ahmed Ali", "30", "091111222", "Regular patient");

        let updated = repo
            .update(
                created.id,
                PatientUpdate {
                    age: Some("31".into()),
                    notes: Some(String::new()),
                    ..Default::default()
                },
            )
            .expect("patient should exist");

        assert_eq!(updated.name, "Ahmed Ali");
        assert_eq!(updated.age, "31");
        assert_eq!(updated.phone, "091111222");
        assert_eq!(updated.notes, "");
        assert_eq!(repo.find_by_id(created.id), Some(&updated));
    }

    #[test]
    fn test_update_missing_patient_returns_none() {
        let mut repo = PatientRepository::new();
        assert!(repo.update(id(1), PatientUpdate::default()).is_none());
    }

    #[test]
    fn test_delete() {
        let mut repo = PatientRepository::new();
        let created = repo.create("Ahmed Ali", "30", "091111222", "");

        assert!(repo.delete(created.id));
        assert!(!repo.delete(created.id));
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_duplicates_are_permitted() {
        let mut repo = PatientRepository::new();
        let a = repo.create("Ahmed Ali", "30", "091111222", "");
        let b = repo.create("Ahmed Ali", "30", "091111222", "");

        assert_ne!(a.id, b.id);
        assert_eq!(repo.count(), 2);
    }
}
