use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::auth::password;

pub mod models;

use models::{NewPayment, Payment, Student, User};

/// Errors from the persistent store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("seed error: {0}")]
    Seed(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const SEED_STUDENTS: &[(&str, &str, &str, &str, f64)] = &[
    ("ADM001", "John Doe", "Form 1", "Mr. Doe", 120.00),
    ("ADM002", "Mary Mensah", "Form 2", "Mrs. Mensah", 60.00),
    ("ADM003", "Kwame Nkrumah", "Form 3", "Mr. Nkrumah", 0.0),
    ("ADM004", "Ama Serwaa", "Form 1", "Mrs. Serwaa", 30.5),
    ("ADM005", "Joseph Agyei", "Form 2", "Mr. Agyei", 250.0),
    ("ADM006", "Rita Ofori", "Form 3", "Mrs. Ofori", 10.0),
];

const SEED_USERS: &[(&str, &str, &str)] = &[
    ("Admin", "admin@samaced.test", "admin"),
    ("Clerk", "clerk@samaced.test", "clerk"),
];

/// Connection pool wrapper with one typed method per query the API performs.
///
/// All methods propagate store failures; nothing is swallowed here.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database file named by `url`,
    /// e.g. `sqlite://data.sqlite`. Foreign keys are enforced per connection.
    pub async fn connect(url: &str) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// In-memory store for tests. A single connection keeps every statement
    /// against the same memory database.
    pub async fn connect_in_memory() -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create the schema if absent, then seed sample data into empty tables.
    /// Safe to run on every startup.
    pub async fn init(&self) -> Result<(), DatabaseError> {
        self.create_tables().await?;
        self.seed_students().await?;
        self.seed_users().await?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_tables(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                admission_no TEXT,
                name TEXT NOT NULL,
                class TEXT,
                guardian TEXT,
                balance REAL NOT NULL DEFAULT 0
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS payments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                method TEXT,
                note TEXT,
                payer_name TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY(student_id) REFERENCES students(id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'user'
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn seed_students(&self) -> Result<(), DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        for (admission_no, name, class, guardian, balance) in SEED_STUDENTS {
            sqlx::query(
                "INSERT INTO students (admission_no, name, class, guardian, balance)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(admission_no)
            .bind(name)
            .bind(class)
            .bind(guardian)
            .bind(balance)
            .execute(&self.pool)
            .await?;
        }

        info!("seeded {} sample students", SEED_STUDENTS.len());
        Ok(())
    }

    async fn seed_users(&self) -> Result<(), DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        // Shared placeholder password for the sample accounts
        for (name, email, role) in SEED_USERS {
            let hash = password::hash_password("password")?;
            sqlx::query(
                "INSERT INTO users (name, email, password_hash, role) VALUES (?, ?, ?, ?)",
            )
            .bind(name)
            .bind(email)
            .bind(hash)
            .bind(role)
            .execute(&self.pool)
            .await?;
        }

        info!("seeded {} sample users", SEED_USERS.len());
        Ok(())
    }

    /// First `limit` students ordered by name.
    pub async fn list_students(&self, limit: i64) -> Result<Vec<Student>, DatabaseError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, admission_no, name, class, guardian, balance
             FROM students ORDER BY name LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    /// Substring match on name or admission number, ordered by name.
    ///
    /// LIKE wildcards in the input are escaped so a literal "%" cannot match
    /// every row.
    pub async fn search_students(&self, query: &str, limit: i64) -> Result<Vec<Student>, DatabaseError> {
        let pattern = format!("%{}%", escape_like(query));
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, admission_no, name, class, guardian, balance
             FROM students
             WHERE name LIKE ? ESCAPE '\\' OR admission_no LIKE ? ESCAPE '\\'
             ORDER BY name LIMIT ?",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    pub async fn student_by_id(&self, id: i64) -> Result<Option<Student>, DatabaseError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, admission_no, name, class, guardian, balance
             FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    pub async fn insert_payment(&self, payment: &NewPayment) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO payments (student_id, amount, method, note, payer_name)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(payment.student_id)
        .bind(payment.amount)
        .bind(&payment.method)
        .bind(&payment.note)
        .bind(&payment.payer_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Apply a payment to a student's running balance. Unbounded; the balance
    /// goes negative when a student overpays.
    pub async fn decrement_balance(&self, student_id: i64, amount: f64) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE students SET balance = balance - ? WHERE id = ?")
            .bind(amount)
            .bind(student_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All payments for one student, newest first.
    pub async fn payments_for_student(&self, student_id: i64) -> Result<Vec<Payment>, DatabaseError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT id, student_id, amount, method, note, payer_name, created_at
             FROM payments WHERE student_id = ?
             ORDER BY created_at DESC, id DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    /// Most recent payments across all students.
    pub async fn recent_payments(&self, limit: i64) -> Result<Vec<Payment>, DatabaseError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT id, student_id, amount, method, note, payer_name, created_at
             FROM payments ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// Escape LIKE wildcards so user input is matched literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("Mary"), "Mary");
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let db = Database::connect_in_memory().await.unwrap();
        db.init().await.unwrap();
        db.init().await.unwrap();

        let students = db.list_students(30).await.unwrap();
        assert_eq!(students.len(), 6);

        let admin = db.user_by_email("admin@samaced.test").await.unwrap();
        assert!(admin.is_some());
    }

    #[tokio::test]
    async fn search_matches_name_and_admission_no() {
        let db = Database::connect_in_memory().await.unwrap();
        db.init().await.unwrap();

        let by_name = db.search_students("Mary", 30).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Mary Mensah");

        let by_admission = db.search_students("ADM005", 30).await.unwrap();
        assert_eq!(by_admission.len(), 1);
        assert_eq!(by_admission[0].name, "Joseph Agyei");
    }

    #[tokio::test]
    async fn literal_percent_matches_nothing() {
        let db = Database::connect_in_memory().await.unwrap();
        db.init().await.unwrap();

        let rows = db.search_students("%", 30).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn balance_decrement_can_go_negative() {
        let db = Database::connect_in_memory().await.unwrap();
        db.init().await.unwrap();

        // Kwame Nkrumah is seeded with a zero balance
        let kwame = db.search_students("Kwame", 30).await.unwrap().remove(0);
        db.decrement_balance(kwame.id, 25.0).await.unwrap();

        let after = db.student_by_id(kwame.id).await.unwrap().unwrap();
        assert_eq!(after.balance, -25.0);
    }
}
