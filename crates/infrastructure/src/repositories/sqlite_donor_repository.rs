use crate::database::{donors, SqlitePool};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use domain::{BloodType, DomainError, Donor, DonorFilter, DonorProfile, DonorRepository, Gender};
use uuid::Uuid;

// Database model
#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = donors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct DonorModel {
    id: String,
    name: String,
    gender: String,
    age: i32,
    blood_type: String,
    weight: f64,
    location: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    contact: String,
    email: Option<String>,
    health_issues: Option<String>,
    notes: Option<String>,
    last_donation: Option<NaiveDate>,
    available: bool,
    created_at: NaiveDateTime,
}

// Whole-record replace: a `None` clears the column.
#[derive(AsChangeset)]
#[diesel(table_name = donors)]
#[diesel(treat_none_as_null = true)]
struct DonorChangeset {
    name: String,
    gender: String,
    age: i32,
    blood_type: String,
    weight: f64,
    location: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    contact: String,
    email: Option<String>,
    health_issues: Option<String>,
    notes: Option<String>,
    last_donation: Option<NaiveDate>,
    available: bool,
}

impl TryFrom<DonorModel> for Donor {
    type Error = DomainError;

    fn try_from(model: DonorModel) -> Result<Self, Self::Error> {
        let corrupt = |what: &str| {
            DomainError::RepositoryError(format!("Stored donor {} has an invalid {}", model.id, what))
        };

        let id = Uuid::parse_str(&model.id).map_err(|_| corrupt("id"))?;
        let gender = model.gender.parse::<Gender>().map_err(|_| corrupt("gender"))?;
        let blood_type = BloodType::parse(&model.blood_type).ok_or_else(|| corrupt("blood type"))?;

        Ok(Donor {
            id,
            name: model.name,
            gender,
            age: model.age,
            blood_type,
            weight: model.weight,
            location: model.location,
            latitude: model.latitude,
            longitude: model.longitude,
            contact: model.contact,
            email: model.email,
            health_issues: model.health_issues,
            notes: model.notes,
            last_donation: model.last_donation,
            available: model.available,
            created_at: model.created_at.and_utc(),
        })
    }
}

impl From<&Donor> for DonorModel {
    fn from(donor: &Donor) -> Self {
        DonorModel {
            id: donor.id.to_string(),
            name: donor.name.clone(),
            gender: donor.gender.as_str().to_string(),
            age: donor.age,
            blood_type: donor.blood_type.as_str().to_string(),
            weight: donor.weight,
            location: donor.location.clone(),
            latitude: donor.latitude,
            longitude: donor.longitude,
            contact: donor.contact.clone(),
            email: donor.email.clone(),
            health_issues: donor.health_issues.clone(),
            notes: donor.notes.clone(),
            last_donation: donor.last_donation,
            available: donor.available,
            created_at: donor.created_at.naive_utc(),
        }
    }
}

impl From<&DonorProfile> for DonorChangeset {
    fn from(profile: &DonorProfile) -> Self {
        DonorChangeset {
            name: profile.name.clone(),
            gender: profile.gender.as_str().to_string(),
            age: profile.age,
            blood_type: profile.blood_type.as_str().to_string(),
            weight: profile.weight,
            location: profile.location.clone(),
            latitude: profile.latitude,
            longitude: profile.longitude,
            contact: profile.contact.clone(),
            email: profile.email.clone(),
            health_issues: profile.health_issues.clone(),
            notes: profile.notes.clone(),
            last_donation: profile.last_donation,
            available: profile.available,
        }
    }
}

fn to_donors(models: Vec<DonorModel>) -> Result<Vec<Donor>, DomainError> {
    models.into_iter().map(Donor::try_from).collect()
}

/// The UNIQUE index on `contact` is what finally rejects a duplicate.
fn write_error(err: DieselError, contact: &str) -> DomainError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DomainError::DuplicateContact(contact.to_string())
        }
        other => DomainError::RepositoryError(other.to_string()),
    }
}

pub struct SqliteDonorRepository {
    pool: SqlitePool,
}

impl SqliteDonorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonorRepository for SqliteDonorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donor>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let id = id.to_string();
        let result = tokio::task::spawn_blocking(move || {
            donors::table
                .filter(donors::id.eq(id))
                .select(DonorModel::as_select())
                .first::<DonorModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        result.map(Donor::try_from).transpose()
    }

    async fn find_by_contact(&self, contact: &str) -> Result<Option<Donor>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let contact = contact.to_string();
        let result = tokio::task::spawn_blocking(move || {
            donors::table
                .filter(donors::contact.eq(contact))
                .select(DonorModel::as_select())
                .first::<DonorModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        result.map(Donor::try_from).transpose()
    }

    async fn find_by_filter(&self, filter: &DonorFilter) -> Result<Vec<Donor>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let blood_type = filter.blood_type;
        let available_only = filter.available_only;
        let result = tokio::task::spawn_blocking(move || {
            let mut query = donors::table.select(DonorModel::as_select()).into_boxed();

            if let Some(blood_type) = blood_type {
                query = query.filter(donors::blood_type.eq(blood_type.as_str()));
            }
            if available_only {
                query = query.filter(donors::available.eq(true));
            }

            query
                .order(donors::created_at.desc())
                .load::<DonorModel>(&mut conn)
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        // SQLite's LIKE and lower() fold ASCII only, so the location
        // substring is matched here with full Unicode lowercasing.
        Ok(to_donors(result)?
            .into_iter()
            .filter(|donor| filter.matches(donor))
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Donor>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            donors::table
                .order(donors::created_at.desc())
                .select(DonorModel::as_select())
                .load::<DonorModel>(&mut conn)
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        to_donors(result)
    }

    async fn save(&self, donor: &Donor) -> Result<Donor, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let new_donor = DonorModel::from(donor);
        let contact = donor.contact.clone();

        let result = tokio::task::spawn_blocking(move || {
            diesel::insert_into(donors::table)
                .values(&new_donor)
                .execute(&mut conn)?;

            // Read back what was stored
            donors::table
                .filter(donors::id.eq(&new_donor.id))
                .select(DonorModel::as_select())
                .first::<DonorModel>(&mut conn)
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| write_error(e, &contact))?;

        Donor::try_from(result)
    }

    async fn update(&self, id: Uuid, profile: &DonorProfile) -> Result<Option<Donor>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let id = id.to_string();
        let changes = DonorChangeset::from(profile);
        let contact = profile.contact.clone();

        let result = tokio::task::spawn_blocking(move || {
            conn.transaction::<_, DieselError, _>(|conn| {
                let updated = diesel::update(donors::table.filter(donors::id.eq(&id)))
                    .set(&changes)
                    .execute(conn)?;
                if updated == 0 {
                    return Ok(None);
                }

                donors::table
                    .filter(donors::id.eq(&id))
                    .select(DonorModel::as_select())
                    .first::<DonorModel>(conn)
                    .optional()
            })
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| write_error(e, &contact))?;

        result.map(Donor::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Donor>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let id = id.to_string();
        let result = tokio::task::spawn_blocking(move || {
            conn.transaction::<_, DieselError, _>(|conn| {
                let existing = donors::table
                    .filter(donors::id.eq(&id))
                    .select(DonorModel::as_select())
                    .first::<DonorModel>(conn)
                    .optional()?;

                if existing.is_some() {
                    diesel::delete(donors::table.filter(donors::id.eq(&id))).execute(conn)?;
                }
                Ok(existing)
            })
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        result.map(Donor::try_from).transpose()
    }
}
