use chrono::{Duration, NaiveDate, Utc};
use domain::{BloodType, DomainError, Donor, DonorFilter, DonorProfile, DonorRepository, Gender};
use infrastructure::{Database, SqliteDonorRepository};
use uuid::Uuid;

fn repository() -> SqliteDonorRepository {
    let database = Database::in_memory().unwrap();
    database.initialize().unwrap();
    SqliteDonorRepository::new(database.get_pool().clone())
}

fn profile(name: &str, blood_type: BloodType, location: &str, contact: &str) -> DonorProfile {
    DonorProfile {
        name: name.to_string(),
        gender: Gender::Female,
        age: 32,
        blood_type,
        weight: 61.5,
        location: location.to_string(),
        latitude: None,
        longitude: None,
        contact: contact.to_string(),
        email: None,
        health_issues: None,
        notes: None,
        last_donation: None,
        available: true,
    }
}

fn donor(name: &str, blood_type: BloodType, location: &str, contact: &str, minutes_ago: i64) -> Donor {
    Donor::with_id(
        Uuid::new_v4(),
        profile(name, blood_type, location, contact),
        Utc::now() - Duration::minutes(minutes_ago),
    )
}

fn names(donors: &[Donor]) -> Vec<&str> {
    donors.iter().map(|d| d.name.as_str()).collect()
}

#[tokio::test]
async fn save_then_find_round_trips_every_field() {
    let repo = repository();
    let mut original = donor("Lakshmi", BloodType::AbNegative, "Guntur", "+919876500001", 0);
    original.latitude = Some(16.3067);
    original.longitude = Some(80.4365);
    original.email = Some("lakshmi@example.com".to_string());
    original.health_issues = Some("None".to_string());
    original.last_donation = NaiveDate::from_ymd_opt(2024, 3, 9);
    original.available = false;

    let saved = repo.save(&original).await.unwrap();
    assert_eq!(saved.id, original.id);

    let found = repo.find_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(found.blood_type, BloodType::AbNegative);
    assert_eq!(found.gender, Gender::Female);
    assert_eq!(found.latitude, Some(16.3067));
    assert_eq!(found.email.as_deref(), Some("lakshmi@example.com"));
    assert_eq!(found.last_donation, NaiveDate::from_ymd_opt(2024, 3, 9));
    assert!(!found.available);

    let by_contact = repo.find_by_contact("+919876500001").await.unwrap().unwrap();
    assert_eq!(by_contact.id, original.id);
    assert!(repo.find_by_contact("+919876500099").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_contact_is_rejected_by_the_store() {
    let repo = repository();
    repo.save(&donor("First", BloodType::OPositive, "Pune", "+919876500002", 5))
        .await
        .unwrap();

    let err = repo
        .save(&donor("Second", BloodType::APositive, "Mumbai", "+919876500002", 0))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::DuplicateContact("+919876500002".to_string()));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn filter_matches_blood_type_and_location_substring_newest_first() {
    let repo = repository();
    repo.save(&donor("Old", BloodType::APositive, "Hyderabad", "+919876500010", 30))
        .await
        .unwrap();
    repo.save(&donor("New", BloodType::APositive, "Secunderabad, HYDERABAD", "+919876500011", 1))
        .await
        .unwrap();
    repo.save(&donor("Other group", BloodType::BPositive, "Hyderabad", "+919876500012", 2))
        .await
        .unwrap();
    repo.save(&donor("Elsewhere", BloodType::APositive, "Chennai", "+919876500013", 3))
        .await
        .unwrap();

    let filter = DonorFilter {
        blood_type: Some(BloodType::APositive),
        location_contains: Some("hyder".to_string()),
        available_only: false,
    };
    let found = repo.find_by_filter(&filter).await.unwrap();
    assert_eq!(names(&found), vec!["New", "Old"]);
}

#[tokio::test]
async fn filter_treats_wildcards_literally() {
    let repo = repository();
    repo.save(&donor("Plain", BloodType::ONegative, "Block A", "+919876500020", 0))
        .await
        .unwrap();
    repo.save(&donor("Percent", BloodType::ONegative, "100% Nagar", "+919876500021", 1))
        .await
        .unwrap();

    let filter = DonorFilter {
        location_contains: Some("%".to_string()),
        ..DonorFilter::default()
    };
    let found = repo.find_by_filter(&filter).await.unwrap();
    assert_eq!(names(&found), vec!["Percent"]);
}

#[tokio::test]
async fn filter_folds_case_beyond_ascii() {
    let repo = repository();
    repo.save(&donor("Jonas", BloodType::APositive, "MÜNCHEN", "+4915112345678", 0))
        .await
        .unwrap();

    for needle in ["MÜNCHEN", "münchen", "Ünch"] {
        let filter = DonorFilter {
            blood_type: Some(BloodType::APositive),
            location_contains: Some(needle.to_string()),
            available_only: false,
        };
        let found = repo.find_by_filter(&filter).await.unwrap();
        assert_eq!(names(&found), vec!["Jonas"], "needle {needle}");
    }
}

#[tokio::test]
async fn filter_can_require_availability() {
    let repo = repository();
    let mut resting = donor("Resting", BloodType::BNegative, "Delhi", "+919876500030", 0);
    resting.available = false;
    repo.save(&resting).await.unwrap();
    repo.save(&donor("Ready", BloodType::BNegative, "Delhi", "+919876500031", 1))
        .await
        .unwrap();

    let filter = DonorFilter {
        blood_type: Some(BloodType::BNegative),
        location_contains: None,
        available_only: true,
    };
    assert_eq!(names(&repo.find_by_filter(&filter).await.unwrap()), vec!["Ready"]);

    let everyone = DonorFilter {
        available_only: false,
        ..filter
    };
    assert_eq!(repo.find_by_filter(&everyone).await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_fields_and_clears_missing_optionals() {
    let repo = repository();
    let mut original = donor("Before", BloodType::OPositive, "Nellore", "+919876500040", 10);
    original.email = Some("before@example.com".to_string());
    original.latitude = Some(14.44);
    original.longitude = Some(79.98);
    repo.save(&original).await.unwrap();

    let replacement = profile("After", BloodType::ONegative, "Tirupati", "+919876500041");
    let updated = repo.update(original.id, &replacement).await.unwrap().unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.name, "After");
    assert_eq!(updated.blood_type, BloodType::ONegative);
    assert_eq!(updated.contact, "+919876500041");
    assert_eq!(updated.email, None);
    assert_eq!(updated.latitude, None);
    assert_eq!(
        updated.created_at.timestamp(),
        original.created_at.timestamp()
    );
}

#[tokio::test]
async fn update_of_missing_id_is_none_and_conflicts_are_reported() {
    let repo = repository();
    assert!(repo
        .update(Uuid::new_v4(), &profile("Ghost", BloodType::APositive, "Goa", "+919876500050"))
        .await
        .unwrap()
        .is_none());

    let first = donor("First", BloodType::APositive, "Goa", "+919876500051", 2);
    let second = donor("Second", BloodType::APositive, "Goa", "+919876500052", 1);
    repo.save(&first).await.unwrap();
    repo.save(&second).await.unwrap();

    let err = repo
        .update(second.id, &profile("Second", BloodType::APositive, "Goa", "+919876500051"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::DuplicateContact("+919876500051".to_string()));

    let untouched = repo.find_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(untouched.contact, "+919876500052");
}

#[tokio::test]
async fn delete_returns_the_removed_record_once() {
    let repo = repository();
    let victim = donor("Leaving", BloodType::AbPositive, "Kochi", "+919876500060", 0);
    repo.save(&victim).await.unwrap();

    let removed = repo.delete(victim.id).await.unwrap().unwrap();
    assert_eq!(removed.contact, "+919876500060");
    assert!(repo.find_by_id(victim.id).await.unwrap().is_none());
    assert!(repo.delete(victim.id).await.unwrap().is_none());
}

#[tokio::test]
async fn find_all_is_newest_first() {
    let repo = repository();
    repo.save(&donor("Middle", BloodType::APositive, "Agra", "+919876500070", 5))
        .await
        .unwrap();
    repo.save(&donor("Newest", BloodType::BPositive, "Agra", "+919876500071", 0))
        .await
        .unwrap();
    repo.save(&donor("Oldest", BloodType::OPositive, "Agra", "+919876500072", 50))
        .await
        .unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(names(&all), vec!["Newest", "Middle", "Oldest"]);
}
