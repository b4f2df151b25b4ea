use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::OptionalExtension;
use tracing::info;

use super::{MealStore, SqliteMealStore, StoreError};
use crate::meal::Meal;

const SELECT_MEAL: &str =
    "SELECT id, name, photo_url, instructions, description, created_at FROM meals";

/// Filters for [`SqliteMealStore::search`]; `None` fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub id: Option<i64>,
    pub name: Option<String>,
    /// Unix seconds, exclusive
    pub created_after: Option<i64>,
    /// Unix seconds, exclusive
    pub created_before: Option<i64>,
}

#[async_trait]
impl MealStore for SqliteMealStore {
    async fn create(&self, meal: &Meal) -> Result<i64> {
        meal.validate()?;

        let created_at = chrono::Utc::now().timestamp();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO meals (name, photo_url, instructions, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                meal.name,
                meal.photo_url,
                meal.instructions,
                meal.description,
                created_at
            ],
        )
        .context("Failed to insert meal")?;

        let id = conn.last_insert_rowid();
        info!("Meal '{}' stored with ID: {}", meal.name, id);
        Ok(id)
    }

    async fn get_random(&self) -> Result<Meal> {
        let conn = self.conn.lock().await;
        let meal = conn
            .query_row(
                &format!("{} ORDER BY RANDOM() LIMIT 1", SELECT_MEAL),
                [],
                parse_meal_row,
            )
            .optional()
            .context("Failed to pick a random meal")?;

        meal.ok_or_else(|| StoreError::NotFound.into())
    }
}

impl SqliteMealStore {
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Meal>> {
        let conn = self.conn.lock().await;
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_MEAL),
            rusqlite::params![id],
            parse_meal_row,
        )
        .optional()
        .context("Failed to read meal")
    }

    pub async fn search(&self, opts: &SearchOptions) -> Result<Vec<Meal>> {
        let mut clauses = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(id) = opts.id {
            params.push(Value::Integer(id));
            clauses.push(format!("id = ?{}", params.len()));
        }
        if let Some(name) = &opts.name {
            params.push(Value::Text(name.clone()));
            clauses.push(format!("name = ?{}", params.len()));
        }
        if let Some(after) = opts.created_after {
            params.push(Value::Integer(after));
            clauses.push(format!("created_at > ?{}", params.len()));
        }
        if let Some(before) = opts.created_before {
            params.push(Value::Integer(before));
            clauses.push(format!("created_at < ?{}", params.len()));
        }

        let mut sql = SELECT_MEAL.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&sql).context("Failed to prepare meal search")?;
        let meals = stmt
            .query_map(rusqlite::params_from_iter(params), parse_meal_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to search meals")?;

        Ok(meals)
    }

    pub async fn get_all(&self, limit: usize) -> Result<Vec<Meal>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id LIMIT ?1", SELECT_MEAL))?;
        let meals = stmt
            .query_map(rusqlite::params![limit as i64], parse_meal_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list meals")?;

        Ok(meals)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let rows = conn
            .execute("DELETE FROM meals WHERE id = ?1", rusqlite::params![id])
            .context("Failed to delete meal")?;

        if rows > 0 {
            info!("Meal deleted with ID: {}", id);
        }
        Ok(rows > 0)
    }
}

fn parse_meal_row(row: &rusqlite::Row) -> rusqlite::Result<Meal> {
    Ok(Meal {
        id: row.get(0)?,
        name: row.get(1)?,
        photo_url: row.get(2)?,
        instructions: row.get(3)?,
        description: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal::MealError;

    fn make_meal(name: &str) -> Meal {
        Meal {
            name: name.to_string(),
            photo_url: format!("https://example.com/{}.jpg", name.to_lowercase()),
            instructions: "Cook it.".to_string(),
            description: String::new(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let store = SqliteMealStore::open_in_memory().unwrap();

        let id = store.create(&make_meal("Soup")).await.unwrap();
        assert!(id > 0);

        let meal = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(meal.id, id);
        assert_eq!(meal.name, "Soup");
        assert_eq!(meal.photo_url, "https://example.com/soup.jpg");
        assert_eq!(meal.instructions, "Cook it.");
        assert_eq!(meal.description, "");
        assert!(meal.created_at > 0);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let store = SqliteMealStore::open_in_memory().unwrap();
        assert!(store.get_by_id(99999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_meal() {
        let store = SqliteMealStore::open_in_memory().unwrap();

        let err = store.create(&make_meal("")).await.unwrap_err();
        assert_eq!(err.downcast_ref::<MealError>(), Some(&MealError::NameEmpty));
        assert!(store.get_all(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_random_empty_store() {
        let store = SqliteMealStore::open_in_memory().unwrap();

        let err = store.get_random().await.unwrap_err();
        assert_eq!(err.downcast_ref::<StoreError>(), Some(&StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_get_random_returns_stored_meal() {
        let store = SqliteMealStore::open_in_memory().unwrap();
        store.create(&make_meal("Soup")).await.unwrap();
        store.create(&make_meal("Pilav")).await.unwrap();

        for _ in 0..10 {
            let meal = store.get_random().await.unwrap();
            assert!(meal.name == "Soup" || meal.name == "Pilav");
        }
    }

    #[tokio::test]
    async fn test_search_filters() {
        let store = SqliteMealStore::open_in_memory().unwrap();
        let soup = store.create(&make_meal("Soup")).await.unwrap();
        store.create(&make_meal("Pilav")).await.unwrap();

        let by_name = store
            .search(&SearchOptions {
                name: Some("Pilav".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Pilav");

        let by_id = store
            .search(&SearchOptions {
                id: Some(soup),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].name, "Soup");

        let all = store.search(&SearchOptions::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let none_in_future = store
            .search(&SearchOptions {
                created_after: Some(chrono::Utc::now().timestamp() + 3600),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none_in_future.is_empty());

        let before_future = store
            .search(&SearchOptions {
                created_before: Some(chrono::Utc::now().timestamp() + 3600),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(before_future.len(), 2);
    }

    #[tokio::test]
    async fn test_get_all_respects_limit() {
        let store = SqliteMealStore::open_in_memory().unwrap();
        for name in ["A", "B", "C"] {
            store.create(&make_meal(name)).await.unwrap();
        }

        let meals = store.get_all(2).await.unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].name, "A");
        assert_eq!(meals[1].name, "B");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = SqliteMealStore::open_in_memory().unwrap();
        let id = store.create(&make_meal("Soup")).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(store.get_by_id(id).await.unwrap().is_none());
        assert!(!store.delete(id).await.unwrap());
    }
}
