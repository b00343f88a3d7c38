use async_trait::async_trait;
use diesel::prelude::*;
use log::warn;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use habitual_core::errors::Result;
use habitual_core::settings::{
    SettingsRepositoryTrait, SettingsUpdate, TrackerSettings, SETTING_COMPLETION_GATING,
};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<TrackerSettings> {
        let mut conn = get_connection(&self.pool)?;
        let all_settings: Vec<(String, String)> = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut settings = TrackerSettings::default();

        // Unknown keys are ignored.
        for (key, value) in all_settings {
            if key == SETTING_COMPLETION_GATING {
                match value.parse() {
                    Ok(gating) => settings.completion_gating = gating,
                    Err(e) => warn!("Ignoring stored setting {}: {}", key, e),
                }
            }
        }

        Ok(settings)
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let settings = new_settings.clone();
        self.writer
            .exec(move |conn| {
                if let Some(gating) = settings.completion_gating {
                    diesel::replace_into(app_settings)
                        .values(&AppSettingDB {
                            setting_key: SETTING_COMPLETION_GATING.to_string(),
                            setting_value: gating.as_str().to_string(),
                        })
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                Ok(())
            })
            .await
    }
}
