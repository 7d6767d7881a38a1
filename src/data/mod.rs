use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::geo::GeoPoint;
use crate::models::donation::Donation;
use crate::models::ngo::{NgoRequest, Priority};
use crate::models::volunteer::Volunteer;

pub const RESTAURANTS_FILE: &str = "restaurant.csv";
pub const NGOS_FILE: &str = "ngo.csv";
pub const VOLUNTEERS_FILE: &str = "volunteer.csv";

/// Source of the three tables a batch runs over. Implementations hand back
/// trimmed strings and finite coordinates, or a data error.
pub trait DataProvider {
    fn load_restaurants(&self) -> Result<Vec<Donation>, AppError>;
    fn load_ngos(&self) -> Result<Vec<NgoRequest>, AppError>;
    fn load_volunteers(&self) -> Result<Vec<Volunteer>, AppError>;
}

#[derive(Deserialize)]
struct RestaurantRow {
    restaurant_id: String,
    restaurant_name: String,
    address: String,
    phone: String,
    food_item: String,
    quantity: String,
    unit: String,
    latitude: String,
    longitude: String,
}

#[derive(Deserialize)]
struct NgoRow {
    ngo_id: String,
    ngo_name: String,
    #[serde(rename = "type")]
    ngo_type: String,
    phone: String,
    address: String,
    requested_item: String,
    priority: String,
    latitude: String,
    longitude: String,
}

#[derive(Deserialize)]
struct VolunteerRow {
    volunteer_id: String,
    name: String,
    phone: String,
    #[serde(default)]
    area: String,
    latitude: String,
    longitude: String,
    assigned_status: String,
}

/// Reads `restaurant.csv`, `ngo.csv` and `volunteer.csv` from one directory.
#[derive(Debug, Clone)]
pub struct CsvDataProvider {
    data_dir: PathBuf,
}

impl CsvDataProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn read_rows<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<(usize, T)>, AppError> {
        read_rows(&self.data_dir.join(file_name))
    }
}

impl DataProvider for CsvDataProvider {
    fn load_restaurants(&self) -> Result<Vec<Donation>, AppError> {
        self.read_rows::<RestaurantRow>(RESTAURANTS_FILE)?
            .into_iter()
            .map(|(line, row)| {
                let cell = Cell::new(RESTAURANTS_FILE, line);
                let quantity = cell.number("quantity", &row.quantity)?;
                if quantity < 0.0 {
                    return Err(cell.error("quantity", &row.quantity, "must not be negative"));
                }

                Ok(Donation {
                    location: cell.location(&row.latitude, &row.longitude)?,
                    restaurant_id: row.restaurant_id,
                    restaurant_name: row.restaurant_name,
                    phone: row.phone,
                    address: row.address,
                    food_item: row.food_item,
                    quantity,
                    unit: row.unit,
                })
            })
            .collect()
    }

    fn load_ngos(&self) -> Result<Vec<NgoRequest>, AppError> {
        self.read_rows::<NgoRow>(NGOS_FILE)?
            .into_iter()
            .map(|(line, row)| {
                let cell = Cell::new(NGOS_FILE, line);
                Ok(NgoRequest {
                    location: cell.location(&row.latitude, &row.longitude)?,
                    priority: Priority::from_label(&row.priority),
                    priority_label: row.priority,
                    ngo_id: row.ngo_id,
                    ngo_name: row.ngo_name,
                    ngo_type: row.ngo_type,
                    phone: row.phone,
                    address: row.address,
                    requested_item: row.requested_item,
                })
            })
            .collect()
    }

    fn load_volunteers(&self) -> Result<Vec<Volunteer>, AppError> {
        self.read_rows::<VolunteerRow>(VOLUNTEERS_FILE)?
            .into_iter()
            .map(|(line, row)| {
                let cell = Cell::new(VOLUNTEERS_FILE, line);
                Ok(Volunteer {
                    location: cell.location(&row.latitude, &row.longitude)?,
                    volunteer_id: row.volunteer_id,
                    name: row.name,
                    phone: row.phone,
                    area: row.area,
                    assigned_status: row.assigned_status,
                })
            })
            .collect()
    }
}

/// Rows paired with their 1-based line number in the file.
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, T)>, AppError> {
    let file = File::open(path)
        .map_err(|err| AppError::Data(format!("cannot open {}: {err}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (index, row) in reader.deserialize::<T>().enumerate() {
        let row = row.map_err(|err| AppError::Data(format!("{}: {err}", path.display())))?;
        rows.push((index + 2, row));
    }

    debug!(path = %path.display(), rows = rows.len(), "table loaded");
    Ok(rows)
}

struct Cell<'a> {
    file: &'a str,
    line: usize,
}

impl<'a> Cell<'a> {
    fn new(file: &'a str, line: usize) -> Self {
        Self { file, line }
    }

    fn error(&self, column: &str, raw: &str, reason: &str) -> AppError {
        AppError::Data(format!(
            "{} line {}: {column} {raw:?} {reason}",
            self.file, self.line
        ))
    }

    fn number(&self, column: &str, raw: &str) -> Result<f64, AppError> {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.error(column, raw, "is not a number")),
        }
    }

    fn location(&self, latitude: &str, longitude: &str) -> Result<GeoPoint, AppError> {
        Ok(GeoPoint::new(
            self.number("latitude", latitude)?,
            self.number("longitude", longitude)?,
        ))
    }
}
