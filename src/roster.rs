//! Registered students, keyed by their scan code

use crate::error::Result;
use crate::store::{Store, STUDENTS_KEY};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A registered student. Never mutated once seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub roll_number: String,
    pub email: String,
    pub qr_code: String,
}

impl Person {
    pub fn new(id: &str, name: &str, roll_number: &str, email: &str, qr_code: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            roll_number: roll_number.to_string(),
            email: email.to_string(),
            qr_code: qr_code.to_string(),
        }
    }
    /// `term` must already be lowercase
    fn matches(&self, term: &str) -> bool {
        [&self.name, &self.roll_number, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

const DEFAULT_NAMES: [&str; 26] = [
    "Aman", "Subhankan", "Mayur", "Hardik", "Shivam", "Sushant", "Ritik", "Amitesh", "Sumit",
    "Kushagra", "Anan", "Arjun", "Vikram", "Rohit", "Karan", "Nikhil", "Aditya", "Prateek",
    "Ankit", "Deepak", "Gaurav", "Manish", "Rajesh", "Suresh", "Akash", "Vishal",
];

/// Built-in roster written on first access when no seed is configured
pub fn default_people() -> Vec<Person> {
    DEFAULT_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let n = i + 1;
            Person {
                id: n.to_string(),
                name: name.to_string(),
                roll_number: format!("CS{:03}", n),
                email: format!("{}@vitbhopal.ac.in", name.to_lowercase()),
                qr_code: format!("QR{:03}", n),
            }
        })
        .collect()
}

/// Read-mostly view over the persisted roster
pub struct Roster<'a, S: Store + ?Sized> {
    store: &'a S,
    seed: Option<Vec<Person>>,
}

impl<'a, S: Store + ?Sized> Roster<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store, seed: None }
    }

    /// Seed with `people` instead of the built-in roster
    pub fn with_seed(store: &'a S, people: Vec<Person>) -> Self {
        Self {
            store,
            seed: Some(people),
        }
    }

    /// All registered people in registration order. Seeds the store on first access.
    pub fn list_people(&self) -> Result<Vec<Person>> {
        if let Some(json) = self.store.read(STUDENTS_KEY)? {
            return Ok(serde_json::from_str(&json)?);
        }

        let people = self.seed.clone().unwrap_or_else(default_people);
        info!("Seeding roster with {} students", people.len());
        self.store
            .write(STUDENTS_KEY, &serde_json::to_string(&people)?)?;
        Ok(people)
    }

    /// Exact, case-sensitive lookup by scan code
    pub fn find_by_code(&self, code: &str) -> Result<Option<Person>> {
        Ok(self
            .list_people()?
            .into_iter()
            .find(|person| person.qr_code == code))
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Person>> {
        Ok(self.list_people()?.into_iter().find(|person| person.id == id))
    }

    /// People whose name, roll number or e-mail contains `term`, ignoring case.
    /// An empty term matches everyone.
    pub fn search(&self, term: &str) -> Result<Vec<Person>> {
        let term = term.to_lowercase();
        Ok(self
            .list_people()?
            .into_iter()
            .filter(|person| person.matches(&term))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_roster() {
        let people = default_people();
        assert_eq!(people.len(), 26);
        assert_eq!(
            people[0],
            Person::new("1", "Aman", "CS001", "aman@vitbhopal.ac.in", "QR001")
        );
        assert_eq!(people[25].qr_code, "QR026");
        assert_eq!(people[25].email, "vishal@vitbhopal.ac.in");
    }

    #[test]
    fn test_list_people_seeds_store() {
        let store = MemoryStore::new();
        let roster = Roster::new(&store);

        assert!(store.read(STUDENTS_KEY).unwrap().is_none());
        let people = roster.list_people().unwrap();
        assert_eq!(people.len(), 26);
        assert!(store.read(STUDENTS_KEY).unwrap().is_some());

        // Stable order across reads
        assert_eq!(roster.list_people().unwrap(), people);
    }

    #[test]
    fn test_existing_roster_is_not_reseeded() {
        let store = MemoryStore::new();
        let custom = vec![Person::new("a", "Asha", "EE001", "asha@example.com", "X1")];
        store
            .write(STUDENTS_KEY, &serde_json::to_string(&custom).unwrap())
            .unwrap();

        let roster = Roster::new(&store);
        assert_eq!(roster.list_people().unwrap(), custom);
    }

    #[test]
    fn test_custom_seed() {
        let store = MemoryStore::new();
        let custom = vec![
            Person::new("a", "Asha", "EE001", "asha@example.com", "X1"),
            Person::new("b", "Bilal", "EE002", "bilal@example.com", "X2"),
        ];
        let roster = Roster::with_seed(&store, custom.clone());

        assert_eq!(roster.list_people().unwrap(), custom);
        assert_eq!(roster.find_by_code("X2").unwrap().unwrap().name, "Bilal");
    }

    #[test]
    fn test_find_by_code_is_exact() {
        let store = MemoryStore::new();
        let roster = Roster::new(&store);

        let person = roster.find_by_code("QR003").unwrap().unwrap();
        assert_eq!(person.name, "Mayur");

        assert!(roster.find_by_code("qr003").unwrap().is_none());
        assert!(roster.find_by_code("QR03").unwrap().is_none());
        assert!(roster.find_by_code("QR999").unwrap().is_none());
    }

    #[test]
    fn test_find_by_id() {
        let store = MemoryStore::new();
        let roster = Roster::new(&store);

        assert_eq!(roster.find_by_id("10").unwrap().unwrap().name, "Kushagra");
        assert!(roster.find_by_id("99").unwrap().is_none());
    }

    #[test]
    fn test_search_ignores_case() {
        let store = MemoryStore::new();
        let roster = Roster::new(&store);

        let names: Vec<String> = roster
            .search("kARAN")
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Karan".to_string()]);
    }

    #[test]
    fn test_search_each_field() {
        let store = MemoryStore::new();
        let custom = vec![
            Person::new("a", "Asha", "EE001", "asha@example.com", "X1"),
            Person::new("b", "Bilal", "ME042", "b.khan@college.edu", "X2"),
            Person::new("c", "Chen", "EE002", "chen@example.com", "X3"),
        ];
        let roster = Roster::with_seed(&store, custom);

        let ids = |term: &str| -> Vec<String> {
            roster
                .search(term)
                .unwrap()
                .into_iter()
                .map(|p| p.id)
                .collect()
        };

        // name
        assert_eq!(ids("bil"), vec!["b"]);
        // roll number, registration order kept
        assert_eq!(ids("ee00"), vec!["a", "c"]);
        // e-mail
        assert_eq!(ids("COLLEGE.EDU"), vec!["b"]);
        // scan codes are not searched
        assert!(ids("x1").is_empty());
        assert_eq!(ids("").len(), 3);
    }

    #[test]
    fn test_person_json_field_names() {
        let person = Person::new("1", "Aman", "CS001", "aman@vitbhopal.ac.in", "QR001");
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["rollNumber"], "CS001");
        assert_eq!(json["qrCode"], "QR001");
    }
}
