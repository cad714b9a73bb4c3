// src/services/tour_service.rs
// DOCUMENTATION: Business logic for the tour catalog
// PURPOSE: Intermediary between handlers and repository, handles extra logic

use crate::db::{TourRepository, TourRow};
use crate::errors::BookingError;
use crate::models::*;
use crate::services::media;
use chrono::{NaiveDate, Utc};
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

/// Minimum destinations a tour needs; the booking code is derived from them
pub const MIN_DESTINATIONS: usize = 3;

pub struct TourService;

impl TourService {
    /// Create a new tour
    /// DOCUMENTATION: Validates the daily/non-daily shape, generates the unique
    /// code from the destination list and delegates the transactional insert
    pub async fn create_tour(
        pool: &PgPool,
        req: CreateTourRequest,
    ) -> Result<Uuid, BookingError> {
        if req.destinations.len() < MIN_DESTINATIONS {
            return Err(BookingError::ValidationError(format!(
                "At least {} destinations required; the tour code is generated from them",
                MIN_DESTINATIONS
            )));
        }

        if req.daily && (req.daily_start_date.is_none() || req.daily_price.is_none()) {
            return Err(BookingError::ValidationError(
                "Daily tour requires start date and price".to_string(),
            ));
        }

        if !req.daily && req.available_dates.as_ref().map_or(true, |d| d.is_empty()) {
            return Err(BookingError::ValidationError(
                "Non-daily tour requires available dates".to_string(),
            ));
        }

        if req.program.is_empty() || req.highlights.is_empty() {
            return Err(BookingError::ValidationError(
                "Program and highlights must not be empty".to_string(),
            ));
        }

        let main_image = media::decode_image(&req.main_image)?;
        let gallery = req
            .gallery
            .iter()
            .map(|img| media::decode_image(img))
            .collect::<Result<Vec<_>, _>>()?;

        let code = Self::generate_code(&req.destinations)?;

        TourRepository::create_tour(pool, &req, &code, main_image, gallery).await
    }

    /// Catalog listing
    pub async fn list_tours(
        pool: &PgPool,
        query: TourListQuery,
    ) -> Result<TourListResponse, BookingError> {
        let (rows, total) = TourRepository::list(pool, &query).await?;

        Ok(TourListResponse {
            tours: rows.iter().map(Self::to_summary).collect(),
            total,
        })
    }

    /// Full client-facing tour detail
    /// DOCUMENTATION: Assembles the tour row, gallery, program, highlights and
    /// (for non-daily tours) the departure dates
    pub async fn get_tour(pool: &PgPool, id: Uuid) -> Result<TourDetailResponse, BookingError> {
        let row = TourRepository::get_by_id(pool, id).await?;
        let gallery = TourRepository::get_gallery(pool, id).await?;
        let program = TourRepository::get_program(pool, id).await?;
        let highlights = TourRepository::get_highlights(pool, id).await?;

        let available_dates = if row.daily {
            Vec::new()
        } else {
            TourRepository::get_dates(pool, id)
                .await?
                .into_iter()
                .map(|d| TourDateResponse {
                    id: d.id,
                    start_date: d.start_date,
                    end_date: d.end_date,
                    price: d.price,
                    spots: d.spots,
                })
                .collect()
        };

        Ok(TourDetailResponse {
            id: row.id,
            code: row.code.clone(),
            title: row.title.clone(),
            type_: row.type_field.clone(),
            days: row.days,
            daily: row.daily,
            price: row.price.unwrap_or(0.0),
            date_start: row.date_start,
            min_spots: row.min_spots,
            max_spots: row.max_spots,
            image: media::to_data_url_or_placeholder(row.image.as_ref()),
            destinations: row.destinations.clone(),
            rating: row.rating.unwrap_or(0.0),
            reviews: row.reviews.unwrap_or(0),
            description: row.description.clone(),
            gallery: gallery.iter().map(|img| media::to_data_url(img)).collect(),
            program: program
                .into_iter()
                .enumerate()
                .map(|(i, day)| ProgramDayResponse {
                    day: i as i32 + 1,
                    title: day.title,
                    description: day.description,
                    destinations: day.destinations,
                    included: day.included,
                })
                .collect(),
            highlights,
            available_dates,
        })
    }

    /// Gallery-only view
    pub async fn get_gallery(pool: &PgPool, id: Uuid) -> Result<GalleryResponse, BookingError> {
        let title = TourRepository::get_title(pool, id).await?;
        let gallery = TourRepository::get_gallery(pool, id).await?;

        Ok(GalleryResponse {
            tour_id: id,
            title,
            gallery: gallery.iter().map(|img| media::to_data_url(img)).collect(),
        })
    }

    /// Full update
    pub async fn update_tour(
        pool: &PgPool,
        id: Uuid,
        req: UpdateTourRequest,
    ) -> Result<(), BookingError> {
        let image = req
            .image
            .as_deref()
            .map(media::decode_image)
            .transpose()?;
        let gallery = req
            .gallery
            .iter()
            .map(|img| media::decode_image(img))
            .collect::<Result<Vec<_>, _>>()?;

        TourRepository::update_tour(pool, id, &req, image, gallery).await
    }

    /// Replace the main image and gallery
    pub async fn update_images(
        pool: &PgPool,
        id: Uuid,
        main_image: Option<String>,
        gallery: Vec<String>,
    ) -> Result<(), BookingError> {
        let image = main_image
            .as_deref()
            .map(media::decode_image)
            .transpose()?;
        let gallery = gallery
            .iter()
            .map(|img| media::decode_image(img))
            .collect::<Result<Vec<_>, _>>()?;

        TourRepository::replace_images(pool, id, image, gallery).await
    }

    /// Unique booking code from the destination list
    /// DOCUMENTATION: TOUR{0-99}-{ddmmyyyy}-{first}-{second}-{last},
    /// three uppercase letters per destination. Fails when fewer than
    /// MIN_DESTINATIONS are given since the code indexes into the list.
    pub fn generate_code(destinations: &[String]) -> Result<String, BookingError> {
        if destinations.len() < MIN_DESTINATIONS {
            return Err(BookingError::ValidationError(format!(
                "Code generation requires at least {} destinations",
                MIN_DESTINATIONS
            )));
        }
        let n = rand::thread_rng().gen_range(0..100);
        Ok(Self::generate_code_at(destinations, Utc::now().date_naive(), n))
    }

    fn generate_code_at(destinations: &[String], date: NaiveDate, n: u32) -> String {
        let tag = |s: &String| -> String {
            s.to_uppercase().chars().take(3).collect()
        };

        format!(
            "TOUR{}-{}-{}-{}-{}",
            n,
            date.format("%d%m%Y"),
            tag(&destinations[0]),
            tag(&destinations[1]),
            tag(&destinations[destinations.len() - 1]),
        )
    }

    fn to_summary(row: &TourRow) -> TourSummary {
        TourSummary {
            id: row.id,
            code: row.code.clone(),
            title: row.title.clone(),
            type_: row.type_field.clone(),
            days: row.days,
            price: row.price.unwrap_or(0.0),
            daily: row.daily,
            date: row.date,
            date_max: row.date_max,
            image: media::to_data_url_or_placeholder(row.image.as_ref()),
            destinations: row.destinations.clone(),
            rating: row.rating.unwrap_or(0.0),
            reviews: row.reviews.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destinations(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_code_uses_first_second_and_last_destination() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let code = TourService::generate_code_at(
            &destinations(&["Marrakech", "Fes", "Chefchaouen", "Tangier"]),
            date,
            42,
        );

        assert_eq!(code, "TOUR42-07032025-MAR-FES-TAN");
    }

    #[test]
    fn test_code_with_exactly_three_destinations() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let code = TourService::generate_code_at(
            &destinations(&["Agadir", "Essaouira", "Casablanca"]),
            date,
            0,
        );

        assert_eq!(code, "TOUR0-31122025-AGA-ESS-CAS");
    }

    #[test]
    fn test_code_handles_short_destination_names() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let code =
            TourService::generate_code_at(&destinations(&["Fe", "Ifrane", "Oujda"]), date, 7);

        assert_eq!(code, "TOUR7-02012025-FE-IFR-OUJ");
    }

    #[test]
    fn test_generated_code_is_within_range() {
        let code =
            TourService::generate_code(&destinations(&["Rabat", "Meknes", "Zagora"])).unwrap();
        assert!(code.starts_with("TOUR"));
        assert!(code.ends_with("-RAB-MEK-ZAG"));
    }

    #[test]
    fn test_code_requires_three_destinations() {
        let err = TourService::generate_code(&destinations(&["Rabat", "Meknes"])).unwrap_err();
        assert!(matches!(err, BookingError::ValidationError(_)));

        let err = TourService::generate_code(&[]).unwrap_err();
        assert!(matches!(err, BookingError::ValidationError(_)));
    }
}
