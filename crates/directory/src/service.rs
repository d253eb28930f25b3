use std::sync::Arc;

use chrono::Utc;

use assetdesk_auth::{CapabilityResolver, Role, hash_password, verify_password};
use assetdesk_core::{DomainError, DomainResult, UserId};
use assetdesk_infra::{Collection, MailMessage, Mailer};

use crate::user::{
    EmployeeSignup, GenericSignup, HrManagerSignup, ProfilePatch, TeamMembership, User, UserStatus,
};

/// Result of the invitation upsert flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New record inserted; a welcome mail was dispatched.
    Inserted(User),
    /// Existing record had its status switched to the incoming `Requested`.
    StatusUpdated(User),
    /// Record already existed; nothing changed.
    Unchanged(User),
}

impl UpsertOutcome {
    pub fn user(&self) -> &User {
        match self {
            UpsertOutcome::Inserted(u)
            | UpsertOutcome::StatusUpdated(u)
            | UpsertOutcome::Unchanged(u) => u,
        }
    }
}

/// Manages user records over the injected users collection.
pub struct DirectoryService {
    users: Arc<dyn Collection<User>>,
    mailer: Arc<dyn Mailer>,
}

impl DirectoryService {
    pub fn new(users: Arc<dyn Collection<User>>, mailer: Arc<dyn Mailer>) -> Self {
        Self { users, mailer }
    }

    /// HR-manager signup: role `HRManager`, status `Verified`.
    pub fn register_hr_manager(&self, signup: HrManagerSignup) -> DomainResult<User> {
        let user = User {
            id: UserId::new(),
            email: signup.email,
            password_hash: Some(hash(&signup.password)?),
            name: signup.name,
            date_of_birth: signup.date_of_birth,
            image: None,
            role: Some(Role::HrManager),
            status: Some(UserStatus::Verified),
            company_name: signup.company_name,
            company_logo: signup.company_logo,
            package_name: signup.package_name,
            member_limit: signup.member_limit,
            timestamp: Utc::now(),
        };
        self.insert_fresh(user, "You have been successfully registered as an HR Manager.")
    }

    /// Employee signup: role `Employee`, status `Verified`.
    pub fn register_employee(&self, signup: EmployeeSignup) -> DomainResult<User> {
        let user = User {
            id: UserId::new(),
            email: signup.email,
            password_hash: Some(hash(&signup.password)?),
            name: signup.name,
            date_of_birth: signup.date_of_birth,
            image: None,
            role: Some(Role::Employee),
            status: Some(UserStatus::Verified),
            company_name: None,
            company_logo: None,
            package_name: None,
            member_limit: None,
            timestamp: Utc::now(),
        };
        self.insert_fresh(user, "You have been successfully registered as an Employee.")
    }

    /// Generic signup carrying role and status in the payload.
    pub fn register(&self, signup: GenericSignup) -> DomainResult<User> {
        let role_label = signup
            .role
            .map(|r| r.as_str().to_string())
            .unwrap_or_else(|| "member".to_string());
        let user = Self::from_generic(signup)?;
        self.insert_fresh(
            user,
            &format!("You have been successfully registered as a {role_label}."),
        )
    }

    /// Invitation flow.
    ///
    /// Existing user with an incoming `Requested` status gets only the status
    /// updated; any other existing user is returned untouched; otherwise the
    /// record is inserted and a welcome mail goes out.
    pub fn upsert(&self, payload: GenericSignup) -> DomainResult<UpsertOutcome> {
        if let Some(mut existing) = self.find_by_email(&payload.email) {
            if payload.status == Some(UserStatus::Requested) {
                existing.status = Some(UserStatus::Requested);
                if !self.users.replace(existing.id.as_uuid().to_owned(), existing.clone()) {
                    return Err(DomainError::NotFound);
                }
                return Ok(UpsertOutcome::StatusUpdated(existing));
            }
            return Ok(UpsertOutcome::Unchanged(existing));
        }

        let user = Self::from_generic(payload)?;
        let user = self.insert_fresh(
            user,
            "We are delighted to have you on board as a valued client. \
             Thank you for choosing us to manage your assets and financial goals.",
        )?;
        Ok(UpsertOutcome::Inserted(user))
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.find_one(&|u: &User| u.email == email)
    }

    /// Full scan. Fine at the assumed scale; there is no pagination.
    pub fn list(&self) -> Vec<User> {
        self.users.all()
    }

    /// Apply a whitelisted profile patch by email and refresh the timestamp.
    ///
    /// `role` and `status` only take effect when the caller is an HR
    /// manager; any other caller patching them is an authorization error
    /// rather than a silent drop.
    pub fn patch_profile(
        &self,
        email: &str,
        patch: ProfilePatch,
        caller_role: Option<Role>,
    ) -> DomainResult<User> {
        let mut user = self.find_by_email(email).ok_or(DomainError::NotFound)?;

        if (patch.role.is_some() || patch.status.is_some())
            && caller_role != Some(Role::HrManager)
        {
            return Err(DomainError::Unauthorized);
        }

        if let Some(name) = patch.name {
            user.name = Some(name);
        }
        if let Some(dob) = patch.date_of_birth {
            user.date_of_birth = Some(dob);
        }
        if let Some(image) = patch.image {
            user.image = Some(image);
        }
        if let Some(company_name) = patch.company_name {
            user.company_name = Some(company_name);
        }
        if let Some(company_logo) = patch.company_logo {
            user.company_logo = Some(company_logo);
        }
        if let Some(package_name) = patch.package_name {
            user.package_name = Some(package_name);
        }
        if let Some(member_limit) = patch.member_limit {
            user.member_limit = Some(member_limit);
        }
        if let Some(role) = patch.role {
            user.role = Some(role);
        }
        if let Some(status) = patch.status {
            user.status = Some(status);
        }
        user.timestamp = Utc::now();

        if !self.users.replace(user.id.as_uuid().to_owned(), user.clone()) {
            return Err(DomainError::NotFound);
        }
        Ok(user)
    }

    /// HR-manager team edit: company affiliation and role, by user id.
    pub fn set_team_membership(
        &self,
        id: UserId,
        membership: TeamMembership,
    ) -> DomainResult<User> {
        let mut user = self
            .users
            .get(id.as_uuid().to_owned())
            .ok_or(DomainError::NotFound)?;

        user.company_name = membership.company_name;
        user.company_logo = membership.company_logo;
        user.role = membership.role;
        user.timestamp = Utc::now();

        if !self.users.replace(id.as_uuid().to_owned(), user.clone()) {
            return Err(DomainError::NotFound);
        }
        Ok(user)
    }

    pub fn remove(&self, id: UserId) -> DomainResult<()> {
        if self.users.remove(id.as_uuid().to_owned()) {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }

    /// Check a submitted identity against stored credentials.
    ///
    /// Unknown identities pass (authentication may have happened at an
    /// external identity provider); known identities with a stored hash must
    /// present the matching password. Verification is the hashing crate's
    /// constant-time compare.
    pub fn verify_credentials(
        &self,
        email: &str,
        password: Option<&str>,
    ) -> DomainResult<Option<User>> {
        let Some(user) = self.find_by_email(email) else {
            return Ok(None);
        };
        match (&user.password_hash, password) {
            (None, _) => Ok(Some(user)),
            (Some(hash), Some(password)) if verify_password(hash, password) => Ok(Some(user)),
            _ => Err(DomainError::Unauthorized),
        }
    }

    fn insert_fresh(&self, user: User, welcome: &str) -> DomainResult<User> {
        // Existence check and insert are two store calls; the duplicate race
        // under concurrent signups is a known, accepted gap.
        if self.find_by_email(&user.email).is_some() {
            return Err(DomainError::conflict("User already exists"));
        }
        self.users.insert(user.id.as_uuid().to_owned(), user.clone());
        self.send_welcome(&user.email, welcome);
        Ok(user)
    }

    fn from_generic(signup: GenericSignup) -> DomainResult<User> {
        let password_hash = signup.password.as_deref().map(hash).transpose()?;
        Ok(User {
            id: UserId::new(),
            email: signup.email,
            password_hash,
            name: signup.name,
            date_of_birth: signup.date_of_birth,
            image: signup.image,
            role: signup.role,
            status: signup.status,
            company_name: signup.company_name,
            company_logo: signup.company_logo,
            package_name: signup.package_name,
            member_limit: signup.member_limit,
            timestamp: Utc::now(),
        })
    }

    /// Welcome mail is fire-and-forget: a relay failure is logged, never
    /// surfaced to the signup caller.
    fn send_welcome(&self, email: &str, body: &str) {
        let msg = MailMessage {
            to: email.to_string(),
            subject: "Welcome to Asset Manager!".to_string(),
            body: body.to_string(),
        };
        if let Err(e) = self.mailer.send(msg) {
            tracing::warn!(error = %e, to = %email, "welcome mail failed");
        }
    }
}

impl CapabilityResolver for DirectoryService {
    fn resolve(&self, email: &str) -> Option<Role> {
        self.find_by_email(email).and_then(|u| u.role)
    }
}

fn hash(password: &str) -> DomainResult<String> {
    hash_password(password).map_err(|e| DomainError::upstream(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_infra::{InMemoryCollection, MailError};
    use std::sync::Mutex;

    struct RecordingMailer {
        sent: Mutex<Vec<MailMessage>>,
        fail: bool,
    }

    impl RecordingMailer {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl Mailer for RecordingMailer {
        fn send(&self, msg: MailMessage) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::Relay("smtp down".into()));
            }
            self.sent.lock().unwrap().push(msg);
            Ok(())
        }
    }

    fn service() -> (DirectoryService, Arc<RecordingMailer>) {
        let mailer = Arc::new(RecordingMailer::new(false));
        let svc = DirectoryService::new(
            Arc::new(InMemoryCollection::new()),
            mailer.clone(),
        );
        (svc, mailer)
    }

    fn hr_signup(email: &str) -> HrManagerSignup {
        HrManagerSignup {
            email: email.to_string(),
            password: "pw".to_string(),
            name: Some("HR".to_string()),
            date_of_birth: None,
            company_name: Some("Acme".to_string()),
            company_logo: None,
            package_name: Some("5 Members".to_string()),
            member_limit: Some(5),
        }
    }

    #[test]
    fn hr_signup_sets_role_and_status() {
        let (svc, mailer) = service();
        let user = svc.register_hr_manager(hr_signup("hr@x.com")).unwrap();

        assert_eq!(user.role, Some(Role::HrManager));
        assert_eq!(user.status, Some(UserStatus::Verified));
        assert!(user.password_hash.as_deref().unwrap().starts_with("$argon2"));
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let (svc, _) = service();
        svc.register_hr_manager(hr_signup("hr@x.com")).unwrap();

        let err = svc.register_hr_manager(hr_signup("hr@x.com")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(svc.list().len(), 1);
    }

    #[test]
    fn mail_failure_does_not_fail_signup() {
        let mailer = Arc::new(RecordingMailer::new(true));
        let svc = DirectoryService::new(Arc::new(InMemoryCollection::new()), mailer);

        assert!(svc.register_hr_manager(hr_signup("hr@x.com")).is_ok());
        assert!(svc.find_by_email("hr@x.com").is_some());
    }

    fn generic(email: &str, status: Option<UserStatus>) -> GenericSignup {
        GenericSignup {
            email: email.to_string(),
            password: None,
            name: None,
            date_of_birth: None,
            image: None,
            role: Some(Role::Employee),
            status,
            company_name: None,
            company_logo: None,
            package_name: None,
            member_limit: None,
        }
    }

    #[test]
    fn upsert_inserts_then_updates_requested_status_only() {
        let (svc, mailer) = service();

        let outcome = svc.upsert(generic("e@x.com", Some(UserStatus::Verified))).unwrap();
        assert!(matches!(outcome, UpsertOutcome::Inserted(_)));
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);

        // Same user coming back as "Requested": only the status moves.
        let outcome = svc.upsert(generic("e@x.com", Some(UserStatus::Requested))).unwrap();
        match outcome {
            UpsertOutcome::StatusUpdated(u) => {
                assert_eq!(u.status, Some(UserStatus::Requested));
            }
            other => panic!("expected StatusUpdated, got {other:?}"),
        }

        // Any other re-submission leaves the record alone, and no second mail.
        let outcome = svc.upsert(generic("e@x.com", Some(UserStatus::Verified))).unwrap();
        assert!(matches!(outcome, UpsertOutcome::Unchanged(_)));
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn patch_profile_whitelists_role_for_non_hr_callers() {
        let (svc, _) = service();
        svc.register(generic("e@x.com", Some(UserStatus::Verified))).unwrap();

        let patch = ProfilePatch {
            role: Some(Role::HrManager),
            ..Default::default()
        };
        let err = svc
            .patch_profile("e@x.com", patch.clone(), Some(Role::Employee))
            .unwrap_err();
        assert_eq!(err, DomainError::Unauthorized);

        // The same patch from an HR manager applies.
        let user = svc.patch_profile("e@x.com", patch, Some(Role::HrManager)).unwrap();
        assert_eq!(user.role, Some(Role::HrManager));
    }

    #[test]
    fn team_edits_and_removal_404_on_missing_id() {
        let (svc, _) = service();
        let membership = TeamMembership {
            company_name: Some("Acme".to_string()),
            company_logo: None,
            role: Some(Role::Employee),
        };

        let missing = UserId::new();
        assert_eq!(
            svc.set_team_membership(missing, membership.clone()).unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(svc.remove(missing).unwrap_err(), DomainError::NotFound);

        let user = svc.register_hr_manager(hr_signup("hr@x.com")).unwrap();
        let updated = svc.set_team_membership(user.id, membership).unwrap();
        assert_eq!(updated.company_name.as_deref(), Some("Acme"));
        svc.remove(user.id).unwrap();
        assert!(svc.find_by_email("hr@x.com").is_none());
    }

    #[test]
    fn verify_credentials_checks_stored_hash() {
        let (svc, _) = service();
        svc.register_employee(EmployeeSignup {
            email: "e@x.com".to_string(),
            password: "s3cret".to_string(),
            name: None,
            date_of_birth: None,
        })
        .unwrap();

        assert!(svc.verify_credentials("e@x.com", Some("s3cret")).unwrap().is_some());
        assert_eq!(
            svc.verify_credentials("e@x.com", Some("wrong")).unwrap_err(),
            DomainError::Unauthorized
        );
        assert_eq!(
            svc.verify_credentials("e@x.com", None).unwrap_err(),
            DomainError::Unauthorized
        );
        // Unknown identities are allowed through (external identity provider).
        assert!(svc.verify_credentials("ghost@x.com", None).unwrap().is_none());
    }

    #[test]
    fn resolve_reads_live_role() {
        let (svc, _) = service();
        let user = svc.register_employee(EmployeeSignup {
            email: "e@x.com".to_string(),
            password: "pw".to_string(),
            name: None,
            date_of_birth: None,
        })
        .unwrap();
        assert_eq!(svc.resolve("e@x.com"), Some(Role::Employee));

        // Promotion shows up immediately.
        svc.set_team_membership(
            user.id,
            TeamMembership {
                company_name: None,
                company_logo: None,
                role: Some(Role::HrManager),
            },
        )
        .unwrap();
        assert_eq!(svc.resolve("e@x.com"), Some(Role::HrManager));
        assert_eq!(svc.resolve("ghost@x.com"), None);
    }
}
