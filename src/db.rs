use async_trait::async_trait;
use surrealdb::{
    engine::any::{self, Any},
    opt::auth::Root,
    Surreal,
};

use crate::{
    config::Config,
    error::{Error, Result},
    functions::materialize::{MeasurementSource, ViewWriter},
    models::{
        enriched::{EnrichedMeasurement, MaterializedModel, MaterializedRowModel},
        measurement::{CreateMeasurementModel, Measurement, MeasurementModel},
        Record, EVENT_STORE, MATERIALIZED_VIEW,
    },
};

pub async fn establish_connection(config: &Config) -> Result<Surreal<Any>> {
    let db = any::connect(config.endpoint.as_str()).await?;

    if let Some(credentials) = &config.credentials {
        db.signin(Root {
            username: &credentials.username,
            password: &credentials.password,
        })
        .await?;
    }

    db.use_ns(config.namespace.as_str())
        .use_db(config.database.as_str())
        .await?;

    tracing::info!(
        endpoint = %config.endpoint,
        namespace = %config.namespace,
        database = %config.database,
        "connected with database"
    );
    Ok(db)
}

/// Classifies a failed `create`: an existing record is a constraint violation,
/// anything else is reported as a database error.
fn write_error(id: i64, error: surrealdb::Error) -> Error {
    // Embedded and remote engines surface this as different variants, the message is shared.
    let message = error.to_string();
    if message.contains("already exists") {
        Error::Constraint {
            id,
            reason: message,
        }
    } else {
        Error::Database(error)
    }
}

/// Event store and materialized view backed by one SurrealDB connection.
#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Any>,
}

impl SurrealStore {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub async fn connect(config: &Config) -> Result<Self> {
        Ok(Self::new(establish_connection(config).await?))
    }

    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }

    /// Appends a measurement to the event store under its own id.
    pub async fn append_measurement(&self, measurement: &Measurement) -> Result<()> {
        let created: Option<Record> = self
            .db
            .create((EVENT_STORE, measurement.id))
            .content(CreateMeasurementModel::from(measurement))
            .await
            .map_err(|e| write_error(measurement.id, e))?;

        match created {
            Some(_) => Ok(()),
            None => Err(Error::Constraint {
                id: measurement.id,
                reason: format!("no record was created in `{EVENT_STORE}`"),
            }),
        }
    }

    /// Reads the materialized view ordered by measurement id.
    pub async fn view_rows(&self) -> Result<Vec<MaterializedRowModel>> {
        let mut response = self
            .db
            .query("SELECT * FROM materialized_view ORDER BY id ASC")
            .await?;
        Ok(response.take(0)?)
    }
}

#[async_trait]
impl MeasurementSource for SurrealStore {
    async fn fetch_all(&self) -> Result<Vec<Measurement>> {
        let mut response = self
            .db
            .query("SELECT * FROM event_store ORDER BY id ASC")
            .await?;
        let models: Vec<MeasurementModel> = response.take(0)?;

        models.into_iter().map(Measurement::try_from).collect()
    }
}

#[async_trait]
impl ViewWriter for SurrealStore {
    async fn clear(&self) -> Result<()> {
        self.db.query("DELETE materialized_view").await?.check()?;
        Ok(())
    }

    async fn insert(&self, row: &EnrichedMeasurement) -> Result<()> {
        let id = row.measurement.id;
        let created: Option<Record> = self
            .db
            .create((MATERIALIZED_VIEW, id))
            .content(MaterializedModel::from(row))
            .await
            .map_err(|e| write_error(id, e))?;

        match created {
            Some(_) => Ok(()),
            None => Err(Error::Constraint {
                id,
                reason: "no row was created".into(),
            }),
        }
    }
}
