//! SurrealDB implementation of [`CustomerRepository`].

use chrono::{DateTime, Utc};
use clientele_core::error::ClienteleResult;
use clientele_core::models::customer::{
    CreateCustomer, Customer, UpdateCustomer, date_of_birth_instant,
};
use clientele_core::repository::CustomerRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;

const ENTITY: &str = "customer";
const UNIQUE_FIELD: &str = "memberNumber";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct CustomerRow {
    name: String,
    date_of_birth: DateTime<Utc>,
    member_number: i64,
    interests: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_customer(self, id: Uuid) -> Customer {
        Customer {
            id,
            name: self.name,
            date_of_birth: self.date_of_birth.date_naive(),
            member_number: self.member_number,
            interests: self.interests,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct CustomerRowWithId {
    record_id: String,
    name: String,
    date_of_birth: DateTime<Utc>,
    member_number: i64,
    interests: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRowWithId {
    fn try_into_customer(self) -> Result<Customer, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::InvalidRecord(format!("customer id {}: {e}", self.record_id)))?;
        Ok(Customer {
            id,
            name: self.name,
            date_of_birth: self.date_of_birth.date_naive(),
            member_number: self.member_number,
            interests: self.interests,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn not_found(id: &str) -> DbError {
    DbError::NotFound {
        entity: ENTITY.into(),
        id: id.into(),
    }
}

/// SurrealDB implementation of the customer store.
#[derive(Clone)]
pub struct SurrealCustomerRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCustomerRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CustomerRepository for SurrealCustomerRepository<C> {
    async fn list(&self) -> ClienteleResult<Vec<Customer>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM customer \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomerRowWithId> = result.take(0).map_err(DbError::from)?;

        let customers = rows
            .into_iter()
            .map(CustomerRowWithId::try_into_customer)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(customers)
    }

    async fn get_by_id(&self, id: Uuid) -> ClienteleResult<Customer> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('customer', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        Ok(row.into_customer(id))
    }

    async fn create(&self, input: CreateCustomer) -> ClienteleResult<Customer> {
        input.validate()?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let member_number = input.member_number;

        let result = self
            .db
            .query(
                "CREATE type::record('customer', $id) SET \
                 name = $name, \
                 date_of_birth = <datetime>$date_of_birth, \
                 member_number = $member_number, \
                 interests = $interests",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind((
                "date_of_birth",
                date_of_birth_instant(input.date_of_birth).to_rfc3339(),
            ))
            .bind(("member_number", member_number))
            .bind(("interests", input.interests))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| {
            DbError::from_write(e, ENTITY, Some((UNIQUE_FIELD, member_number.to_string())))
        })?;

        let rows: Vec<CustomerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        debug!(customer_id = %id, member_number, "Customer created");

        Ok(row.into_customer(id))
    }

    async fn update(&self, id: Uuid, input: UpdateCustomer) -> ClienteleResult<Customer> {
        input.validate()?;

        let id_str = id.to_string();
        let member_number = input.member_number;

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.date_of_birth.is_some() {
            sets.push("date_of_birth = <datetime>$date_of_birth");
        }
        if input.member_number.is_some() {
            sets.push("member_number = $member_number");
        }
        if input.interests.is_some() {
            sets.push("interests = $interests");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('customer', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(date_of_birth) = input.date_of_birth {
            builder = builder.bind((
                "date_of_birth",
                date_of_birth_instant(date_of_birth).to_rfc3339(),
            ));
        }
        if let Some(member_number) = member_number {
            builder = builder.bind(("member_number", member_number));
        }
        if let Some(interests) = input.interests {
            builder = builder.bind(("interests", interests));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| {
            DbError::from_write(
                e,
                ENTITY,
                member_number.map(|n| (UNIQUE_FIELD, n.to_string())),
            )
        })?;

        let rows: Vec<CustomerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        debug!(customer_id = %id, "Customer updated");

        Ok(row.into_customer(id))
    }

    async fn delete(&self, id: Uuid) -> ClienteleResult<Customer> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('customer', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        debug!(customer_id = %id, "Customer deleted");

        Ok(row.into_customer(id))
    }
}
