//! Interpretation tables: WMO weather code and month number to
//! human-readable Russian labels.
//!
//! Both tables are fixed at build time. Unknown keys are a hard
//! [`WeatherError::UnknownCode`], never a fallback string: an
//! unrecognized code means the upstream contract is broken.

use crate::error::WeatherError;

/// Translate a WMO weather interpretation code into a description.
pub fn weather_description(code: i64) -> Result<&'static str, WeatherError> {
    let description = match code {
        0 => "Ясно",
        1 => "В основном ясно",
        2 => "Переменная облачность",
        3 => "Облачно",
        45 => "Туман",
        48 => "Туман с изморозью",
        51 => "Слабая морось",
        53 => "Умеренная морось",
        55 => "Сильная морось",
        56 => "Слабая ледяная морось",
        57 => "Сильная ледяная морось",
        61 => "Слабый дождь",
        63 => "Умеренный дождь",
        65 => "Сильный дождь",
        66 => "Слабый ледяной дождь",
        67 => "Сильный ледяной дождь",
        71 => "Слабый снегопад",
        73 => "Умеренный снегопад",
        75 => "Сильный снегопад",
        77 => "Град",
        80 => "Слабый ливень",
        81 => "Умеренный ливень",
        83 => "Сильный ливень",
        85 => "Слабый дождь со снегом",
        86 => "Сильный дождь со снегом",
        95 => "Гроза",
        96 => "Гроза с небольшим градом",
        99 => "Гроза с сильным градом",
        other => return Err(WeatherError::UnknownCode(other.to_string())),
    };

    Ok(description)
}

/// Every weather code known to [`weather_description`], in table order.
pub const fn all_weather_codes() -> &'static [i64] {
    &[
        0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 83,
        85, 86, 95, 96, 99,
    ]
}

/// Every description from the weather table, in table order.
/// Used to offer the favourite-weather choices to the user.
pub fn all_descriptions() -> Vec<&'static str> {
    all_weather_codes()
        .iter()
        .filter_map(|code| weather_description(*code).ok())
        .collect()
}

/// Translate a zero-padded two-digit month number into its
/// abbreviated Russian label.
pub fn month_label(two_digit_month: &str) -> Result<&'static str, WeatherError> {
    let label = match two_digit_month {
        "01" => "Янв",
        "02" => "Фев",
        "03" => "Мар",
        "04" => "Апр",
        "05" => "Мая",
        "06" => "Июн",
        "07" => "Июл",
        "08" => "Авг",
        "09" => "Сен",
        "10" => "Окт",
        "11" => "Ноя",
        "12" => "Дек",
        other => return Err(WeatherError::UnknownCode(other.to_string())),
    };

    Ok(label)
}
