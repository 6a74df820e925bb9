//! Account operations: self-registration, login, the settings user, and
//! password changes.
//!
//! Credentials are compared as plain values; hashing belongs to a storage
//! boundary this crate does not own.

use chrono::Utc;

use crate::core::{Result, StoreError, ids};
use crate::model::{Gender, Instructor, NewUser, Role, Student, User, UserPatch};
use crate::store::LmsStore;
use crate::store::people::ProfilePatch;

const ADMIN_REGISTRATION_CODE: &str = "ZAVIA_ADMIN_2024";
const INSTRUCTOR_REGISTRATION_CODE: &str = "ZAVIA_INSTRUCTOR_2024";

impl LmsStore {
    /// Self-service registration. Admin and instructor roles are gated by
    /// registration codes; students register freely. A student or
    /// instructor registration also creates the management-side mirror
    /// record under the same id. Returns the user with the credential
    /// stripped.
    pub async fn register_user(&mut self, new: NewUser) -> Result<User> {
        self.ensure_loaded().await?;
        match new.role {
            Role::Admin if new.registration_code.as_deref() != Some(ADMIN_REGISTRATION_CODE) => {
                return Err(StoreError::Invalid(
                    "Invalid registration code for Admin role.".to_string(),
                ));
            }
            Role::Instructor
                if new.registration_code.as_deref() != Some(INSTRUCTOR_REGISTRATION_CODE) =>
            {
                return Err(StoreError::Invalid(
                    "Invalid registration code for Instructor role.".to_string(),
                ));
            }
            _ => {}
        }
        if self.users.values().any(|u| u.email == new.email) {
            return Err(StoreError::Conflict(
                "User with this email already exists.".to_string(),
            ));
        }
        let user = User {
            id: ids::serial_id(&self.users, "user-"),
            name: new.name,
            email: new.email.clone(),
            avatar_url: format!("https://i.pravatar.cc/150?u={}", new.email),
            role: new.role,
            password: Some(new.password),
            profile_picture_url: None,
            phone: None,
            google_meet_id: None,
        };
        let now = Utc::now().to_rfc3339();
        match user.role {
            Role::Student => {
                let student = Student {
                    id: user.id.clone(),
                    name: user.name.clone(),
                    email: user.email.clone(),
                    avatar_url: user.avatar_url.clone(),
                    courses_enrolled: 0,
                    overall_progress: 0.0,
                    join_date: now.clone(),
                    created_at: now,
                    gender: Gender::Male,
                    phone: None,
                    google_meet_id: None,
                    profile_picture_url: None,
                };
                self.students.insert(student.id.clone(), student);
            }
            Role::Instructor => {
                let instructor = Instructor {
                    id: user.id.clone(),
                    name: user.name.clone(),
                    email: user.email.clone(),
                    avatar_url: user.avatar_url.clone(),
                    created_at: now,
                    gender: Gender::Male,
                    phone: None,
                    google_meet_id: None,
                    profile_picture_url: None,
                };
                self.instructors.insert(instructor.id.clone(), instructor);
            }
            Role::Admin => {}
        }
        let public = user.redacted();
        self.users.insert(user.id.clone(), user);
        self.persist().await?;
        Ok(public)
    }

    /// Plain credential check against the user table. Read-only; no flush.
    pub async fn login_user(&mut self, email: &str, password: &str) -> Result<User> {
        self.ensure_loaded().await?;
        self.users
            .values()
            .find(|u| u.email == email && u.password.as_deref() == Some(password))
            .map(User::redacted)
            .ok_or_else(|| StoreError::Unauthorized("Invalid email or password.".to_string()))
    }

    pub async fn get_settings_user(&mut self) -> Result<Option<User>> {
        self.ensure_loaded().await?;
        Ok(self.settings_user.as_ref().map(User::redacted))
    }

    /// Patch the settings user's profile, repairing the user table and the
    /// role mirror in the same operation. Returns `None` when no settings
    /// user exists.
    pub async fn update_settings_user(&mut self, patch: UserPatch) -> Result<Option<User>> {
        self.ensure_loaded().await?;
        let Some(id) = self.settings_user.as_ref().map(|u| u.id.clone()) else {
            return Ok(None);
        };
        self.repair_mirrors(&id, &ProfilePatch::from(&patch));
        let updated = self.settings_user.as_ref().map(User::redacted);
        self.persist().await?;
        Ok(updated)
    }

    pub async fn change_password(
        &mut self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.ensure_loaded().await?;
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound("User not found.".to_string()))?;
        if user.password.as_deref() != Some(current_password) {
            return Err(StoreError::Unauthorized(
                "Incorrect current password.".to_string(),
            ));
        }
        user.password = Some(new_password.to_string());
        self.persist().await?;
        Ok(())
    }

    /// Privileged reset: no current-password check.
    pub async fn admin_reset_password(&mut self, user_id: &str, new_password: &str) -> Result<()> {
        self.ensure_loaded().await?;
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound("User not found.".to_string()))?;
        user.password = Some(new_password.to_string());
        self.persist().await?;
        Ok(())
    }
}
