// src/db/tour_repository.rs
// DOCUMENTATION: Database access layer for the tour catalog
// PURPOSE: Abstract database operations from business logic

use crate::errors::BookingError;
use crate::models::*;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Internal struct for mapping catalog rows
/// DOCUMENTATION: Carries the per-tour aggregates (effective price, date window,
/// rating) computed by the listing query
#[derive(Debug, FromRow)]
pub struct TourRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    #[sqlx(rename = "type")]
    pub type_field: String,
    pub days: i32,
    pub image: Option<Vec<u8>>,
    pub destinations: Vec<String>,
    pub daily: bool,
    pub date_start: Option<NaiveDate>,
    pub min_spots: i32,
    pub max_spots: i32,
    pub price: Option<f64>,        // fixed price (daily) or MIN over departures
    pub date: Option<NaiveDate>,   // earliest departure
    pub date_max: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
}

/// Program day row
#[derive(Debug, FromRow)]
pub struct ProgramDayRow {
    pub title: String,
    pub description: String,
    pub included: Vec<String>,
    pub destinations: Vec<String>,
}

/// Departure date row
#[derive(Debug, FromRow)]
pub struct TourDateRow {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub spots: i32,
}

const SELECT_CATALOG: &str = r#"
    SELECT
        t.id, t.title, t.description, t.code, t.type, t.days,
        t.image, t.destinations, t.daily, t.date_start,
        t.min_spots, t.max_spots,
        CASE WHEN t.daily THEN t.price ELSE MIN(d.price) END AS price,
        CASE WHEN t.daily THEN t.date_start ELSE MIN(d.start_date) END AS date,
        CASE WHEN t.daily THEN NULL ELSE MAX(d.start_date) END AS date_max,
        COALESCE(AVG(r.rating)::float8, 0) AS rating,
        COUNT(DISTINCT r.id) AS reviews
    FROM tours t
"#;

/// TourRepository: All database operations for tours
/// DOCUMENTATION: Uses query_as for type-safe SQL queries
pub struct TourRepository;

impl TourRepository {
    /// Create a new tour with all child rows
    /// DOCUMENTATION: Single transaction inserting the tour, gallery images,
    /// program days, departure dates (non-daily only) and highlights
    /// Used by POST /tours endpoint
    pub async fn create_tour(
        pool: &PgPool,
        req: &CreateTourRequest,
        code: &str,
        main_image: Vec<u8>,
        gallery: Vec<Vec<u8>>,
    ) -> Result<Uuid, BookingError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO tours (
                title, description, code, type, days, image, destinations,
                daily, date_start, price, min_spots, max_spots,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(code)
        .bind(&req.type_)
        .bind(req.days)
        .bind(&main_image)
        .bind(&req.destinations)
        .bind(req.daily)
        .bind(if req.daily { req.daily_start_date } else { None })
        .bind(if req.daily { req.daily_price } else { None })
        .bind(req.min_spots)
        .bind(req.max_spots)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to create tour: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        let tour_id = inserted.0;

        for img in &gallery {
            sqlx::query("INSERT INTO tour_images (tour_id, content) VALUES ($1, $2)")
                .bind(tour_id)
                .bind(img)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    log::error!("Failed to insert gallery image for {}: {}", tour_id, e);
                    BookingError::DatabaseError(e.to_string())
                })?;
        }

        Self::insert_program(&mut tx, tour_id, &req.program).await?;

        if !req.daily {
            if let Some(dates) = &req.available_dates {
                Self::insert_dates(&mut tx, tour_id, dates).await?;
            }
        }

        Self::insert_highlights(&mut tx, tour_id, &req.highlights).await?;

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit tour creation: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        log::info!("Created tour {} ({})", tour_id, code);
        Ok(tour_id)
    }

    /// Catalog listing with filters, sorting and pagination
    /// DOCUMENTATION: Used for GET /tours endpoint
    /// Returns tuple: (results, total_count) for pagination
    pub async fn list(
        pool: &PgPool,
        query: &TourListQuery,
    ) -> Result<(Vec<TourRow>, i64), BookingError> {
        let limit = query.limit.unwrap_or(9).clamp(1, 100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let (join_clauses, where_clauses) = Self::filter_clauses(query);
        let join_clause = format!(
            "LEFT JOIN tour_dates d ON {} LEFT JOIN tour_reviews r ON r.tour_id = t.id",
            join_clauses.join(" AND ")
        );
        let where_clause = format!("WHERE {}", where_clauses.join(" AND "));
        let order_clause = Self::order_clause(query.sort_by.as_deref());

        // Get total count (filters only, aggregates not needed)
        let count_sql = format!("SELECT COUNT(*) FROM tours t {}", where_clause);
        let count_result: (i64,) = sqlx::query_as(&count_sql)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Count query error: {}", e);
                BookingError::DatabaseError(e.to_string())
            })?;
        let total = count_result.0;

        let sql = format!(
            "{} {} {} GROUP BY t.id {} LIMIT {} OFFSET {}",
            SELECT_CATALOG, join_clause, where_clause, order_clause, limit, offset
        );

        log::debug!("Executing catalog query: {}", sql);

        let rows = sqlx::query_as::<_, TourRow>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Catalog query error: {}", e);
                BookingError::DatabaseError(e.to_string())
            })?;

        log::info!(
            "Catalog listing: {} results, {} total (page {})",
            rows.len(),
            total,
            page
        );

        Ok((rows, total))
    }

    /// Retrieve one tour with catalog aggregates
    /// DOCUMENTATION: Used for GET /tours/{id} endpoint
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<TourRow, BookingError> {
        let sql = format!(
            "{} LEFT JOIN tour_dates d ON d.tour_id = t.id \
             LEFT JOIN tour_reviews r ON r.tour_id = t.id \
             WHERE t.id = $1 GROUP BY t.id",
            SELECT_CATALOG
        );

        let row = sqlx::query_as::<_, TourRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching tour: {}", e);
                BookingError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Tour not found: {}", id);
                BookingError::NotFound(id.to_string())
            })?;

        Ok(row)
    }

    /// Gallery images for a tour, insertion order
    pub async fn get_gallery(pool: &PgPool, id: Uuid) -> Result<Vec<Vec<u8>>, BookingError> {
        let rows: Vec<(Vec<u8>,)> = sqlx::query_as(
            "SELECT content FROM tour_images WHERE tour_id = $1 ORDER BY created_at, id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch gallery for {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Program days for a tour, day order
    pub async fn get_program(pool: &PgPool, id: Uuid) -> Result<Vec<ProgramDayRow>, BookingError> {
        sqlx::query_as::<_, ProgramDayRow>(
            "SELECT title, description, included, destinations \
             FROM program_days WHERE tour_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch program for {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })
    }

    /// Highlight titles for a tour
    pub async fn get_highlights(pool: &PgPool, id: Uuid) -> Result<Vec<String>, BookingError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT title FROM highlights WHERE tour_id = $1 ORDER BY id")
                .bind(id)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to fetch highlights for {}: {}", id, e);
                    BookingError::DatabaseError(e.to_string())
                })?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Departure dates for a non-daily tour
    pub async fn get_dates(pool: &PgPool, id: Uuid) -> Result<Vec<TourDateRow>, BookingError> {
        sqlx::query_as::<_, TourDateRow>(
            "SELECT id, start_date, end_date, price, spots \
             FROM tour_dates WHERE tour_id = $1 ORDER BY start_date",
        )
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch dates for {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })
    }

    /// Full tour update
    /// DOCUMENTATION: Replaces the tour row and all child rows in one
    /// transaction; departure dates are replaced only for non-daily tours
    pub async fn update_tour(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateTourRequest,
        image: Option<Vec<u8>>,
        gallery: Vec<Vec<u8>>,
    ) -> Result<(), BookingError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        let updated = sqlx::query(
            r#"
            UPDATE tours SET
                title = $1,
                description = $2,
                code = $3,
                type = $4,
                days = $5,
                image = $6,
                destinations = $7,
                min_spots = $8,
                daily = $9,
                date_start = $10,
                price = $11,
                updated_at = NOW()
            WHERE id = $12
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.code)
        .bind(&req.type_)
        .bind(req.days)
        .bind(&image)
        .bind(&req.destinations)
        .bind(req.min_spots)
        .bind(req.daily)
        .bind(if req.daily { req.daily_start_date } else { None })
        .bind(if req.daily { req.daily_price } else { None })
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Update failed for tour {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if updated == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        sqlx::query("DELETE FROM tour_images WHERE tour_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        for img in &gallery {
            sqlx::query("INSERT INTO tour_images (tour_id, content) VALUES ($1, $2)")
                .bind(id)
                .bind(img)
                .execute(&mut *tx)
                .await
                .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        }

        sqlx::query("DELETE FROM program_days WHERE tour_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        Self::insert_program(&mut tx, id, &req.program).await?;

        sqlx::query("DELETE FROM highlights WHERE tour_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        Self::insert_highlights(&mut tx, id, &req.highlights).await?;

        if !req.daily {
            sqlx::query("DELETE FROM tour_dates WHERE tour_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
            Self::insert_dates(&mut tx, id, &req.available_dates).await?;
        }

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit tour update: {}", e);
            BookingError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated tour: {}", id);
        Ok(())
    }

    /// Partial update of the scalar tour columns
    /// DOCUMENTATION: Used by PUT /tours/{id}/info
    pub async fn update_info(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateTourInfoRequest,
    ) -> Result<(), BookingError> {
        let updated = sqlx::query(
            r#"
            UPDATE tours SET
                code = $1,
                title = $2,
                type = $3,
                days = $4,
                min_spots = $5,
                description = $6,
                daily = $7,
                date_start = $8,
                price = $9,
                updated_at = NOW()
            WHERE id = $10
            "#,
        )
        .bind(&req.code)
        .bind(&req.title)
        .bind(&req.type_)
        .bind(req.days)
        .bind(req.min_spots)
        .bind(&req.description)
        .bind(req.daily)
        .bind(if req.daily { req.daily_start_date } else { None })
        .bind(if req.daily { req.daily_price } else { None })
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Info update failed for tour {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if updated == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Replace departure dates
    /// DOCUMENTATION: Used by PUT /tours/{id}/dates
    pub async fn replace_dates(
        pool: &PgPool,
        id: Uuid,
        dates: &[TourDateInput],
    ) -> Result<(), BookingError> {
        let mut tx = pool.begin().await.map_err(|e| {
            BookingError::DatabaseError(e.to_string())
        })?;

        sqlx::query("DELETE FROM tour_dates WHERE tour_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        Self::insert_dates(&mut tx, id, dates).await?;

        tx.commit()
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        log::info!("Replaced departure dates for tour {}", id);
        Ok(())
    }

    /// Replace the day-by-day program
    /// DOCUMENTATION: Used by PUT /tours/{id}/program
    pub async fn replace_program(
        pool: &PgPool,
        id: Uuid,
        program: &[ProgramDayInput],
    ) -> Result<(), BookingError> {
        let mut tx = pool.begin().await.map_err(|e| {
            BookingError::DatabaseError(e.to_string())
        })?;

        sqlx::query("DELETE FROM program_days WHERE tour_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        Self::insert_program(&mut tx, id, program).await?;

        tx.commit()
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        log::info!("Replaced program for tour {}", id);
        Ok(())
    }

    /// Replace highlight lines
    /// DOCUMENTATION: Used by PUT /tours/{id}/highlights
    pub async fn replace_highlights(
        pool: &PgPool,
        id: Uuid,
        highlights: &[String],
    ) -> Result<(), BookingError> {
        let mut tx = pool.begin().await.map_err(|e| {
            BookingError::DatabaseError(e.to_string())
        })?;

        sqlx::query("DELETE FROM highlights WHERE tour_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        Self::insert_highlights(&mut tx, id, highlights).await?;

        tx.commit()
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        log::info!("Replaced highlights for tour {}", id);
        Ok(())
    }

    /// Update the destination list
    /// DOCUMENTATION: Used by PUT /tours/{id}/destinations
    pub async fn update_destinations(
        pool: &PgPool,
        id: Uuid,
        destinations: &[String],
    ) -> Result<(), BookingError> {
        let updated = sqlx::query(
            "UPDATE tours SET destinations = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(destinations)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Destination update failed for tour {}: {}", id, e);
            BookingError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if updated == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Replace the main image and gallery
    /// DOCUMENTATION: Used by PUT /tours/{id}/images
    pub async fn replace_images(
        pool: &PgPool,
        id: Uuid,
        main_image: Option<Vec<u8>>,
        gallery: Vec<Vec<u8>>,
    ) -> Result<(), BookingError> {
        let mut tx = pool.begin().await.map_err(|e| {
            BookingError::DatabaseError(e.to_string())
        })?;

        if let Some(img) = &main_image {
            let updated =
                sqlx::query("UPDATE tours SET image = $1, updated_at = NOW() WHERE id = $2")
                    .bind(img)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| BookingError::DatabaseError(e.to_string()))?
                    .rows_affected();
            if updated == 0 {
                return Err(BookingError::NotFound(id.to_string()));
            }
        }

        sqlx::query("DELETE FROM tour_images WHERE tour_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        for img in &gallery {
            sqlx::query("INSERT INTO tour_images (tour_id, content) VALUES ($1, $2)")
                .bind(id)
                .bind(img)
                .execute(&mut *tx)
                .await
                .map_err(|e| BookingError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        log::info!("Replaced images for tour {}", id);
        Ok(())
    }

    /// Delete a tour; child rows cascade
    pub async fn delete_tour(pool: &PgPool, id: Uuid) -> Result<(), BookingError> {
        let rows = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for tour {}: {}", id, e);
                BookingError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        log::info!("Deleted tour: {}", id);
        Ok(())
    }

    /// Tour title lookup, used by the gallery endpoint
    pub async fn get_title(pool: &PgPool, id: Uuid) -> Result<String, BookingError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT title FROM tours WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        row.map(|r| r.0)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    /// Join and WHERE fragments for the catalog listing
    /// DOCUMENTATION: Departure-level filters ride on the LEFT JOIN condition
    /// so dated tours aggregate only over matching departures; daily tours
    /// carry price and window start on the tour row and are filtered in WHERE
    fn filter_clauses(query: &TourListQuery) -> (Vec<String>, Vec<String>) {
        let budget_min = query.budget_min.unwrap_or(0.0);
        let budget_max = query.budget_max.unwrap_or(1e9);
        let days_min = query.days_min.unwrap_or(1);
        let days_max = query.days_max.unwrap_or(365);

        let mut join_clauses = vec![format!(
            "d.tour_id = t.id AND d.price BETWEEN {} AND {}",
            budget_min, budget_max
        )];
        if let Some(from) = query.date_from {
            join_clauses.push(format!("d.start_date >= '{}'", from));
        }
        if let Some(to) = query.date_to {
            join_clauses.push(format!("d.end_date <= '{}'", to));
        }

        let mut where_clauses = vec![format!(
            "t.days BETWEEN {} AND {}",
            days_min, days_max
        )];

        where_clauses.push(format!(
            "(NOT t.daily OR t.price BETWEEN {} AND {})",
            budget_min, budget_max
        ));
        if let Some(from) = query.date_from {
            where_clauses.push(format!("(NOT t.daily OR t.date_start >= '{}')", from));
        }
        if let Some(to) = query.date_to {
            where_clauses.push(format!("(NOT t.daily OR t.date_start <= '{}')", to));
        }

        if let Some(term) = &query.search_term {
            if !term.is_empty() {
                let escaped = term.replace('\'', "''");
                where_clauses.push(format!(
                    "(t.title ILIKE '%{}%' OR array_to_string(t.destinations, ',') ILIKE '%{}%')",
                    escaped, escaped
                ));
            }
        }

        if let Some(type_) = &query.type_ {
            if !type_.is_empty() {
                where_clauses.push(format!("t.type = '{}'", type_.replace('\'', "''")));
            }
        }

        (join_clauses, where_clauses)
    }

    /// ORDER BY fragment for a sort key
    /// DOCUMENTATION: price/date/rating are output aliases of the aggregate
    /// columns and must be referenced bare; wrapping them in an expression
    /// makes Postgres resolve the ambiguous source columns instead
    fn order_clause(sort_by: Option<&str>) -> &'static str {
        match sort_by {
            Some("price-asc") | None => "ORDER BY price ASC NULLS LAST",
            Some("price-desc") => "ORDER BY price DESC NULLS LAST",
            Some("days-asc") => "ORDER BY t.days ASC",
            Some("days-desc") => "ORDER BY t.days DESC",
            Some("rating") => "ORDER BY rating DESC",
            Some("date") => "ORDER BY date ASC NULLS LAST",
            Some(_) => "ORDER BY t.created_at DESC",
        }
    }

    async fn insert_program(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tour_id: Uuid,
        program: &[ProgramDayInput],
    ) -> Result<(), BookingError> {
        for (position, day) in program.iter().enumerate() {
            sqlx::query(
                "INSERT INTO program_days (tour_id, position, title, description, included, destinations) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(tour_id)
            .bind(position as i32 + 1)
            .bind(&day.title)
            .bind(&day.description)
            .bind(&day.included)
            .bind(&day.destinations)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                log::error!("Failed to insert program day for {}: {}", tour_id, e);
                BookingError::DatabaseError(e.to_string())
            })?;
        }
        Ok(())
    }

    async fn insert_dates(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tour_id: Uuid,
        dates: &[TourDateInput],
    ) -> Result<(), BookingError> {
        for date in dates {
            sqlx::query(
                "INSERT INTO tour_dates (tour_id, start_date, end_date, spots, price) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(tour_id)
            .bind(date.start_date)
            .bind(date.end_date)
            .bind(date.spots)
            .bind(date.price)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                log::error!("Failed to insert departure date for {}: {}", tour_id, e);
                BookingError::DatabaseError(e.to_string())
            })?;
        }
        Ok(())
    }

    async fn insert_highlights(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tour_id: Uuid,
        highlights: &[String],
    ) -> Result<(), BookingError> {
        for highlight in highlights {
            // Title column is capped at 50 chars, full line kept in text
            let title: String = highlight.chars().take(50).collect();
            sqlx::query("INSERT INTO highlights (tour_id, title, text) VALUES ($1, $2, $3)")
                .bind(tour_id)
                .bind(title)
                .bind(highlight)
                .execute(&mut **tx)
                .await
                .map_err(|e| {
                    log::error!("Failed to insert highlight for {}: {}", tour_id, e);
                    BookingError::DatabaseError(e.to_string())
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_query() -> TourListQuery {
        TourListQuery {
            page: None,
            limit: None,
            search_term: None,
            sort_by: None,
            date_from: None,
            date_to: None,
            days_min: None,
            days_max: None,
            budget_min: None,
            budget_max: None,
            type_: None,
        }
    }

    #[test]
    fn test_order_clause_references_aliases_bare() {
        // The aggregate aliases (price, date, rating) must appear bare;
        // inside an expression Postgres resolves the source columns and
        // "price" is ambiguous between tours and tour_dates
        let cases = [
            (Some("price-asc"), "ORDER BY price ASC NULLS LAST"),
            (None, "ORDER BY price ASC NULLS LAST"),
            (Some("price-desc"), "ORDER BY price DESC NULLS LAST"),
            (Some("days-asc"), "ORDER BY t.days ASC"),
            (Some("days-desc"), "ORDER BY t.days DESC"),
            (Some("rating"), "ORDER BY rating DESC"),
            (Some("date"), "ORDER BY date ASC NULLS LAST"),
            (Some("unknown"), "ORDER BY t.created_at DESC"),
        ];

        for (key, expected) in cases {
            let clause = TourRepository::order_clause(key);
            assert_eq!(clause, expected);
            assert!(!clause.contains("COALESCE"));
        }
    }

    #[test]
    fn test_date_window_filters_daily_tours_too() {
        let mut query = empty_query();
        query.date_from = Some(chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        query.date_to = Some(chrono::NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());

        let (join, where_) = TourRepository::filter_clauses(&query);

        // Departure-level window on the join for dated tours
        assert!(join.iter().any(|c| c == "d.start_date >= '2026-06-01'"));
        assert!(join.iter().any(|c| c == "d.end_date <= '2026-06-30'"));
        // Service-window bounds for daily tours
        assert!(where_
            .iter()
            .any(|c| c == "(NOT t.daily OR t.date_start >= '2026-06-01')"));
        assert!(where_
            .iter()
            .any(|c| c == "(NOT t.daily OR t.date_start <= '2026-06-30')"));
    }

    #[test]
    fn test_search_term_quotes_are_escaped() {
        let mut query = empty_query();
        query.search_term = Some("l'atlas".to_string());

        let (_, where_) = TourRepository::filter_clauses(&query);

        assert!(where_.iter().any(|c| c.contains("l''atlas")));
        assert!(!where_.iter().any(|c| c.contains("l'atlas'")));
    }
}
