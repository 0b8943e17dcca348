//! Durable user preferences over SQLite.
//!
//! Three independent relations: favourite cities (unique names), the
//! last-used city (at most one row) and the favourite-weather rule
//! (at most one row). The singleton relations are written as
//! delete-then-insert inside one transaction, so "at most one row" can
//! never be violated by a partial write.

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

use crate::error::WeatherError;

/// A stored favourite-weather rule: when current conditions match
/// `description`, the presentation layer shows `phrase`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteWeatherRule {
    pub description: String,
    pub phrase: String,
}

pub struct PreferenceStore {
    conn: Connection,
}

impl PreferenceStore {
    /// Open or create the database at `path`.
    pub fn open(path: &Path) -> Result<Self, WeatherError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// An in-memory store, for tests.
    pub fn open_in_memory() -> Result<Self, WeatherError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, WeatherError> {
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), WeatherError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS favourite_city (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS last_used_city (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS favourite_weather (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                weather TEXT NOT NULL UNIQUE,
                phrase TEXT NOT NULL
            );",
        )?;

        Ok(())
    }

    /// All favourite city names, in storage order.
    pub fn list_favourite_cities(&self) -> Result<Vec<String>, WeatherError> {
        let mut stmt = self.conn.prepare("SELECT name FROM favourite_city")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(names)
    }

    /// Add a city to favourites. A name that is already stored is a
    /// [`WeatherError::DuplicateCity`], not a silent no-op.
    pub fn add_favourite_city(&self, name: &str) -> Result<(), WeatherError> {
        let result = self.conn.execute(
            "INSERT INTO favourite_city (name) VALUES (?1)",
            params![name],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(WeatherError::DuplicateCity(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_last_used_city(&self) -> Result<Option<String>, WeatherError> {
        let name = self
            .conn
            .query_row("SELECT name FROM last_used_city", [], |row| row.get(0))
            .optional()?;

        Ok(name)
    }

    /// Remember `name` as the last city the user looked at. Any prior
    /// value is removed first.
    pub fn set_last_used_city(&mut self, name: &str) -> Result<(), WeatherError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM last_used_city", [])?;
        tx.execute(
            "INSERT INTO last_used_city (name) VALUES (?1)",
            params![name],
        )?;
        tx.commit()?;

        Ok(())
    }

    pub fn get_favourite_weather_rule(
        &self,
    ) -> Result<Option<FavouriteWeatherRule>, WeatherError> {
        let rule = self
            .conn
            .query_row("SELECT weather, phrase FROM favourite_weather", [], |row| {
                Ok(FavouriteWeatherRule {
                    description: row.get(0)?,
                    phrase: row.get(1)?,
                })
            })
            .optional()?;

        Ok(rule)
    }

    /// Store the favourite-weather rule, replacing any prior one.
    pub fn set_favourite_weather_rule(
        &mut self,
        description: &str,
        phrase: &str,
    ) -> Result<(), WeatherError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM favourite_weather", [])?;
        tx.execute(
            "INSERT INTO favourite_weather (weather, phrase) VALUES (?1, ?2)",
            params![description, phrase],
        )?;
        tx.commit()?;

        Ok(())
    }

    pub fn clear_favourite_weather_rule(&self) -> Result<(), WeatherError> {
        self.conn.execute("DELETE FROM favourite_weather", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PreferenceStore {
        PreferenceStore::open_in_memory().expect("in-memory store must open")
    }

    #[test]
    fn favourites_start_empty() {
        let store = store();
        assert!(store.list_favourite_cities().unwrap().is_empty());
    }

    #[test]
    fn add_and_list_favourites() {
        let store = store();

        store.add_favourite_city("Москва").unwrap();
        store.add_favourite_city("Казань").unwrap();

        let cities = store.list_favourite_cities().unwrap();
        assert_eq!(cities, vec!["Москва", "Казань"]);
    }

    #[test]
    fn duplicate_favourite_is_rejected_and_not_stored_twice() {
        let store = store();

        store.add_favourite_city("Москва").unwrap();
        let err = store.add_favourite_city("Москва").unwrap_err();

        assert!(matches!(err, WeatherError::DuplicateCity(_)));
        assert!(err.to_string().contains("Москва"));
        assert_eq!(store.list_favourite_cities().unwrap().len(), 1);
    }

    #[test]
    fn favourite_uniqueness_is_exact_string_equality() {
        let store = store();

        store.add_favourite_city("Москва").unwrap();
        // A differently-cased name is a different city as far as the
        // store is concerned.
        store.add_favourite_city("москва").unwrap();

        assert_eq!(store.list_favourite_cities().unwrap().len(), 2);
    }

    #[test]
    fn last_used_city_is_none_until_set() {
        let store = store();
        assert_eq!(store.get_last_used_city().unwrap(), None);
    }

    #[test]
    fn last_used_city_keeps_only_the_latest() {
        let mut store = store();

        store.set_last_used_city("Москва").unwrap();
        store.set_last_used_city("Казань").unwrap();

        assert_eq!(
            store.get_last_used_city().unwrap().as_deref(),
            Some("Казань")
        );

        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM last_used_city", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn favourite_weather_rule_replaces_and_clears() {
        let mut store = store();

        assert_eq!(store.get_favourite_weather_rule().unwrap(), None);

        store.set_favourite_weather_rule("Ясно", "Отличный день!").unwrap();
        store
            .set_favourite_weather_rule("Облачно", "Возьми зонт")
            .unwrap();

        let rule = store.get_favourite_weather_rule().unwrap().unwrap();
        assert_eq!(rule.description, "Облачно");
        assert_eq!(rule.phrase, "Возьми зонт");

        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM favourite_weather", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);

        store.clear_favourite_weather_rule().unwrap();
        assert_eq!(store.get_favourite_weather_rule().unwrap(), None);
    }

    #[test]
    fn preferences_survive_reopening_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.sql");

        {
            let mut store = PreferenceStore::open(&path).unwrap();
            store.add_favourite_city("Москва").unwrap();
            store.set_last_used_city("Казань").unwrap();
        }

        let store = PreferenceStore::open(&path).unwrap();
        assert_eq!(store.list_favourite_cities().unwrap(), vec!["Москва"]);
        assert_eq!(
            store.get_last_used_city().unwrap().as_deref(),
            Some("Казань")
        );
    }
}
