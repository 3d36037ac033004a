use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
}
