use thiserror::Error;

/// Failure kinds shared by every core operation.
///
/// Display strings are shown to the end user verbatim, so the
/// user-correctable variants keep the product's Russian wording.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Geocoding produced no match for the city name.
    #[error("Такого города не найдено!")]
    CityNotFound,

    /// The forecast or geocoding service could not be reached, or
    /// answered with a non-success status.
    #[error("Не удалось получить ответ от сервера: {0}")]
    ServiceUnavailable(String),

    /// The favourite-city unique constraint was violated.
    #[error("Город <<{0}>> уже добавлен в любимые")]
    DuplicateCity(String),

    /// A weather or month code absent from the interpretation tables.
    /// Indicates an upstream contract break, not a user mistake.
    #[error("Неизвестный код: {0}")]
    UnknownCode(String),

    /// The response payload is missing an expected field.
    #[error("В ответе сервера отсутствует поле: {0}")]
    NoData(String),

    /// Backing store failure (open, I/O, schema).
    #[error("Ошибка базы данных: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl WeatherError {
    pub(crate) fn no_data(field: &str) -> Self {
        WeatherError::NoData(field.to_string())
    }
}
