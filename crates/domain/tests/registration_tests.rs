mod common;

use common::{submission, BrokenGeocoder, FixedGeocoder, InMemoryDonorRepository};
use domain::{BloodType, Coordinates, DomainError, DonorRegistrationService, DonorRepository};
use std::sync::Arc;

fn service(repository: &Arc<InMemoryDonorRepository>) -> DonorRegistrationService {
    DonorRegistrationService::new(repository.clone(), "91")
}

fn field_of(err: DomainError) -> &'static str {
    match err {
        DomainError::ValidationError { field, .. } => field,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn registers_a_normalised_donor() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let mut form = submission("98765 43210");
    form.email = Some("  ".to_string());
    form.notes = Some(" evenings only ".to_string());
    form.last_donation = Some("2024-03-01T00:00:00.000Z".to_string());

    let donor = service(&repository).register(form).await.unwrap();

    assert_eq!(donor.contact, "+919876543210");
    assert_eq!(donor.blood_type, BloodType::APositive);
    assert_eq!(donor.blood_type.as_str(), "A+");
    assert!(donor.available);
    assert_eq!(donor.email, None);
    assert_eq!(donor.notes.as_deref(), Some("evenings only"));
    assert_eq!(donor.last_donation.unwrap().to_string(), "2024-03-01");
    assert_eq!(repository.count(), 1);
}

#[tokio::test]
async fn validation_runs_in_order() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let service = service(&repository);

    let mut form = submission("9876543210");
    form.name = Some("   ".to_string());
    form.age = Some(10.0);
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "name");

    let mut form = submission("9876543210");
    form.gender = None;
    form.weight = Some(20.0);
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "gender");

    let mut form = submission("9876543210");
    form.age = None;
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "age");

    let mut form = submission("9876543210");
    form.blood_type = Some(String::new());
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "bloodType");

    let mut form = submission("9876543210");
    form.weight = None;
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "weight");

    let mut form = submission("9876543210");
    form.location = Some(" ".to_string());
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "location");

    let form = submission("");
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "contact");
}

#[tokio::test]
async fn absent_fields_report_their_own_name() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let service = service(&repository);

    let mut form = submission("9876543210");
    form.name = None;
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "name");

    let mut form = submission("9876543210");
    form.location = None;
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "location");

    let mut form = submission("9876543210");
    form.contact = None;
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "contact");

    let mut form = submission("9876543210");
    form.age = Some(25.5);
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "age");
}

#[tokio::test]
async fn age_and_weight_bounds_block_the_write() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let service = service(&repository);

    for age in [17.0, 61.0, -5.0, 25.5] {
        let mut form = submission("9876543210");
        form.age = Some(age);
        assert!(service.register(form).await.is_err(), "age {age} accepted");
    }
    for weight in [44.9, 0.0, f64::NAN] {
        let mut form = submission("9876543210");
        form.weight = Some(weight);
        assert!(service.register(form).await.is_err(), "weight {weight} accepted");
    }
    assert_eq!(repository.count(), 0);

    for age in [18.0, 60.0] {
        let mut form = submission(&format!("98765432{}", age as i64));
        form.age = Some(age);
        form.weight = Some(45.0);
        assert!(service.register(form).await.is_ok(), "age {age} rejected");
    }
    assert_eq!(repository.count(), 2);
}

#[tokio::test]
async fn duplicate_contact_is_rejected_after_normalisation() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let service = service(&repository);

    service.register(submission("9876543210")).await.unwrap();
    let err = service
        .register(submission("+91 98765-43210"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::DuplicateContact(_)));
    assert_eq!(err.to_string(), "Donor with this contact already exists");
    assert_eq!(repository.count(), 1);
}

#[tokio::test]
async fn unparseable_phone_is_a_hard_failure() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let err = service(&repository)
        .register(submission("12-34"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidPhoneNumber(_)));
    assert_eq!(repository.count(), 0);
}

#[tokio::test]
async fn country_hint_and_location_pick_the_calling_code() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let service = service(&repository);

    let mut form = submission("020 7946 0958");
    form.country = Some("UK".to_string());
    assert_eq!(service.validate(&form).unwrap().contact, "+442079460958");

    let mut form = submission("071 234 5678");
    form.location = Some("Colombo, Sri Lanka".to_string());
    assert_eq!(service.validate(&form).unwrap().contact, "+94712345678");
}

#[tokio::test]
async fn unknown_enumerations_are_field_errors() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let service = service(&repository);

    let mut form = submission("9876543210");
    form.blood_type = Some("Z+".to_string());
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "bloodType");

    let mut form = submission("9876543210");
    form.gender = Some("robot".to_string());
    assert_eq!(field_of(service.validate(&form).unwrap_err()), "gender");
}

#[tokio::test]
async fn half_a_coordinate_pair_is_rejected() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let mut form = submission("9876543210");
    form.latitude = Some(16.5);

    let err = service(&repository).validate(&form).unwrap_err();
    assert_eq!(field_of(err), "latitude");
}

#[tokio::test]
async fn geocoder_fills_missing_coordinates() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let service = DonorRegistrationService::new(repository.clone(), "91")
        .with_geocoder(Arc::new(FixedGeocoder(Coordinates::new(16.5062, 80.648))));

    let donor = service.register(submission("9876543210")).await.unwrap();
    assert_eq!(donor.latitude, Some(16.5062));
    assert_eq!(donor.longitude, Some(80.648));
}

#[tokio::test]
async fn geocoder_failure_does_not_block_registration() {
    let repository = Arc::new(InMemoryDonorRepository::new());
    let service = DonorRegistrationService::new(repository.clone(), "91")
        .with_geocoder(Arc::new(BrokenGeocoder));

    let donor = service.register(submission("9876543210")).await.unwrap();
    assert_eq!(donor.latitude, None);
    assert!(repository.find_by_id(donor.id).await.unwrap().is_some());
}

#[tokio::test]
async fn store_outage_surfaces_as_repository_error() {
    let repository = Arc::new(InMemoryDonorRepository::offline());
    let err = service(&repository)
        .register(submission("9876543210"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "server_error");
}
