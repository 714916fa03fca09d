use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Role, User, UserUpdate};

use super::{from_json_list, to_json_list, OptionalRow};

const USER_COLUMNS: &str = "id, name, email, role, phone, address, gender, age, blood_type,
     profile_pic, license_id, allergies, conditions, created_at";

type UserRow = (
    String, String, String, String,
    Option<String>, Option<String>, Option<String>, Option<u32>, Option<String>,
    Option<String>, Option<String>,
    String, String, DateTime<Utc>,
);

fn read_user_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
        row.get(11)?,
        row.get(12)?,
        row.get(13)?,
    ))
}

fn user_from_row(row: UserRow) -> Result<User, DatabaseError> {
    let (
        id, name, email, role, phone, address, gender, age, blood_type,
        profile_pic, license_id, allergies, conditions, created_at,
    ) = row;
    Ok(User {
        id: Uuid::parse_str(&id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        name,
        email,
        role: Role::from_str(&role)?,
        phone,
        address,
        gender,
        age,
        blood_type,
        profile_pic,
        license_id,
        allergies: from_json_list(&allergies),
        conditions: from_json_list(&conditions),
        created_at,
    })
}

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, name, email, role, phone, address, gender, age, blood_type,
         profile_pic, license_id, allergies, conditions, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            user.id.to_string(),
            user.name,
            user.email,
            user.role.as_str(),
            user.phone,
            user.address,
            user.gender,
            user.age,
            user.blood_type,
            user.profile_pic,
            user.license_id,
            to_json_list(&user.allergies),
            to_json_list(&user.conditions),
            user.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let mut stmt =
        conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
    let row = stmt
        .query_row(params![id.to_string()], read_user_row)
        .optional()?;
    row.map(user_from_row).transpose()
}

/// Exact, case-sensitive email equality — the lookup `grant` relies on.
pub fn find_user_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<User>, DatabaseError> {
    let mut stmt =
        conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))?;
    let row = stmt.query_row(params![email], read_user_row).optional()?;
    row.map(user_from_row).transpose()
}

pub fn user_exists(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE id = ?1",
        params![id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Apply a partial update; untouched fields keep their stored values.
/// Returns false when no user with the given id exists.
pub fn update_user(
    conn: &Connection,
    id: &Uuid,
    update: &UserUpdate,
) -> Result<bool, DatabaseError> {
    let updated = conn.execute(
        "UPDATE users SET
             name = COALESCE(?2, name),
             phone = COALESCE(?3, phone),
             address = COALESCE(?4, address),
             gender = COALESCE(?5, gender),
             age = COALESCE(?6, age),
             blood_type = COALESCE(?7, blood_type),
             profile_pic = COALESCE(?8, profile_pic),
             license_id = COALESCE(?9, license_id),
             allergies = COALESCE(?10, allergies),
             conditions = COALESCE(?11, conditions)
         WHERE id = ?1",
        params![
            id.to_string(),
            update.name,
            update.phone,
            update.address,
            update.gender,
            update.age,
            update.blood_type,
            update.profile_pic,
            update.license_id,
            update.allergies.as_deref().map(to_json_list),
            update.conditions.as_deref().map(to_json_list),
        ],
    )?;
    Ok(updated > 0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::Role;

    pub(crate) fn sample_user(name: &str, email: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            phone: None,
            address: None,
            gender: None,
            age: None,
            blood_type: None,
            profile_pic: None,
            license_id: None,
            allergies: vec![],
            conditions: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let mut user = sample_user("Asha Rao", "asha@example.com", Role::Patient);
        user.age = Some(34);
        user.blood_type = Some("O+".to_string());
        user.allergies = vec!["penicillin".to_string()];
        insert_user(&conn, &user).unwrap();

        let fetched = get_user(&conn, &user.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Asha Rao");
        assert_eq!(fetched.role, Role::Patient);
        assert_eq!(fetched.age, Some(34));
        assert_eq!(fetched.allergies, vec!["penicillin".to_string()]);
    }

    #[test]
    fn get_missing_user_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_user(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn email_lookup_is_case_sensitive() {
        let conn = open_memory_database().unwrap();
        let user = sample_user("Ben Osei", "Ben@Example.com", Role::Doctor);
        insert_user(&conn, &user).unwrap();

        assert!(find_user_by_email(&conn, "Ben@Example.com").unwrap().is_some());
        assert!(find_user_by_email(&conn, "ben@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let conn = open_memory_database().unwrap();
        insert_user(&conn, &sample_user("A", "dup@example.com", Role::Patient)).unwrap();
        let result = insert_user(&conn, &sample_user("B", "dup@example.com", Role::Patient));
        assert!(result.is_err());
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        let conn = open_memory_database().unwrap();
        let mut user = sample_user("Cara Lim", "cara@example.com", Role::Patient);
        user.phone = Some("555-0100".to_string());
        insert_user(&conn, &user).unwrap();

        let update = UserUpdate {
            address: Some("12 Elm St".to_string()),
            ..Default::default()
        };
        assert!(update_user(&conn, &user.id, &update).unwrap());

        let fetched = get_user(&conn, &user.id).unwrap().unwrap();
        assert_eq!(fetched.address.as_deref(), Some("12 Elm St"));
        assert_eq!(fetched.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn update_missing_user_returns_false() {
        let conn = open_memory_database().unwrap();
        assert!(!update_user(&conn, &Uuid::new_v4(), &UserUpdate::default()).unwrap());
    }
}
