//! Expense CRUD, filtered listing and statistics.

use crate::error::LedgerError;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;

/// Sort fields accepted by [`ExpenseStore::list`]. Anything else falls back
/// to `date`.
const SORT_FIELDS: &[&str] = &["date", "amount", "title", "category", "created_at"];

/// A stored expense row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Fields for creating or replacing an expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Listing options: filters, pagination and sorting.
#[derive(Debug, Clone)]
pub struct ExpenseQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Substring match against title and description.
    pub search: Option<String>,
}

impl Default for ExpenseQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: None,
            sort_order: None,
            category: None,
            start_date: None,
            end_date: None,
            search: None,
        }
    }
}

/// One page of expenses plus pagination bookkeeping.
#[derive(Debug, Serialize)]
pub struct Page {
    pub expenses: Vec<Expense>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

/// Current-month total and count for one category.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CategoryTotal {
    pub category: Option<String>,
    pub total: f64,
    pub count: i64,
}

/// Spend for a single day.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub daily_total: f64,
}

/// Aggregate expense statistics for one user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub monthly_by_category: Vec<CategoryTotal>,
    pub recent_trend: Vec<DailyTotal>,
}

/// Expense storage, always scoped by the owning user id.
#[derive(Clone)]
pub struct ExpenseStore {
    pool: SqlitePool,
}

impl ExpenseStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new expense and return the stored row.
    ///
    /// Missing category defaults to "Other", missing description to "".
    pub async fn create(&self, user_id: i64, expense: NewExpense) -> Result<Expense, LedgerError> {
        let category = expense.category.unwrap_or_else(|| "Other".to_string());
        let description = expense.description.unwrap_or_default();

        let result = sqlx::query(
            "INSERT INTO expenses (user_id, title, amount, category, description, date) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(&category)
        .bind(&description)
        .bind(expense.date)
        .execute(&self.pool)
        .await?;

        self.get(user_id, result.last_insert_rowid()).await
    }

    /// Fetch one expense; the owner check is part of the lookup.
    pub async fn get(&self, user_id: i64, expense_id: i64) -> Result<Expense, LedgerError> {
        sqlx::query_as::<_, Expense>(
            "SELECT id, user_id, title, amount, category, description, date, \
                    created_at, updated_at \
             FROM expenses WHERE id = ? AND user_id = ?",
        )
        .bind(expense_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LedgerError::ExpenseNotFound)
    }

    /// List expenses with filters, pagination and whitelisted sorting.
    pub async fn list(&self, user_id: i64, query: &ExpenseQuery) -> Result<Page, LedgerError> {
        let mut where_sql = String::from("user_id = ?");
        if query.category.is_some() {
            where_sql.push_str(" AND category = ?");
        }
        if query.start_date.is_some() {
            where_sql.push_str(" AND date >= ?");
        }
        if query.end_date.is_some() {
            where_sql.push_str(" AND date <= ?");
        }
        if query.search.is_some() {
            where_sql.push_str(" AND (title LIKE ? OR description LIKE ?)");
        }
        let search_pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let count_sql = format!("SELECT COUNT(*) FROM expenses WHERE {where_sql}");
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql).bind(user_id);
        if let Some(c) = &query.category {
            count_q = count_q.bind(c.as_str());
        }
        if let Some(d) = query.start_date {
            count_q = count_q.bind(d);
        }
        if let Some(d) = query.end_date {
            count_q = count_q.bind(d);
        }
        if let Some(p) = &search_pattern {
            count_q = count_q.bind(p.as_str()).bind(p.as_str());
        }
        let total = count_q.fetch_one(&self.pool).await?;

        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let offset = (page as i64 - 1) * limit as i64;
        let (sort_field, sort_dir) = sort_clause(query);

        let rows_sql = format!(
            "SELECT id, user_id, title, amount, category, description, date, \
                    created_at, updated_at \
             FROM expenses WHERE {where_sql} \
             ORDER BY {sort_field} {sort_dir} \
             LIMIT ? OFFSET ?"
        );
        let mut rows_q = sqlx::query_as::<_, Expense>(&rows_sql).bind(user_id);
        if let Some(c) = &query.category {
            rows_q = rows_q.bind(c.as_str());
        }
        if let Some(d) = query.start_date {
            rows_q = rows_q.bind(d);
        }
        if let Some(d) = query.end_date {
            rows_q = rows_q.bind(d);
        }
        if let Some(p) = &search_pattern {
            rows_q = rows_q.bind(p.as_str()).bind(p.as_str());
        }
        let expenses = rows_q
            .bind(limit as i64)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let pages = if total == 0 {
            0
        } else {
            (total + limit as i64 - 1) / limit as i64
        };

        Ok(Page {
            expenses,
            pagination: Pagination {
                page,
                limit,
                total,
                pages,
            },
        })
    }

    /// Replace an expense's fields. Category/description are taken as given
    /// (absent means cleared).
    pub async fn update(
        &self,
        user_id: i64,
        expense_id: i64,
        expense: NewExpense,
    ) -> Result<Expense, LedgerError> {
        let result = sqlx::query(
            "UPDATE expenses \
             SET title = ?, amount = ?, category = ?, description = ?, date = ?, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND user_id = ?",
        )
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(expense.category.as_deref())
        .bind(expense.description.as_deref())
        .bind(expense.date)
        .bind(expense_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::ExpenseNotFound);
        }
        self.get(user_id, expense_id).await
    }

    /// Delete one expense.
    pub async fn delete(&self, user_id: i64, expense_id: i64) -> Result<(), LedgerError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ? AND user_id = ?")
            .bind(expense_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::ExpenseNotFound);
        }
        Ok(())
    }

    /// Distinct categories the user has spent in, sorted.
    pub async fn categories(&self, user_id: i64) -> Result<Vec<String>, LedgerError> {
        let rows = sqlx::query_scalar::<_, Option<String>>(
            "SELECT DISTINCT category FROM expenses WHERE user_id = ? ORDER BY category",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().flatten().collect())
    }

    /// Current-month totals per category plus the last seven days of spend.
    pub async fn stats(&self, user_id: i64) -> Result<ExpenseStats, LedgerError> {
        let monthly_by_category = sqlx::query_as::<_, CategoryTotal>(
            "SELECT category, SUM(amount) AS total, COUNT(*) AS count \
             FROM expenses \
             WHERE user_id = ? AND date >= date('now', 'start of month') \
             GROUP BY category \
             ORDER BY total DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let recent_trend = sqlx::query_as::<_, DailyTotal>(
            "SELECT date, SUM(amount) AS daily_total \
             FROM expenses \
             WHERE user_id = ? AND date >= date('now', '-7 days') \
             GROUP BY date \
             ORDER BY date",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ExpenseStats {
            monthly_by_category,
            recent_trend,
        })
    }
}

fn sort_clause(query: &ExpenseQuery) -> (&'static str, &'static str) {
    let field = query
        .sort_by
        .as_deref()
        .and_then(|s| SORT_FIELDS.iter().find(|f| **f == s))
        .copied()
        .unwrap_or("date");

    let dir = match query.sort_order.as_deref() {
        Some(o) if o.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    };

    (field, dir)
}
