use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use labdesk_api::domain::repository::{
    BookingRepository, ChallengeCache, LabTestRepository, Mailer, ReportFileStore, UserRepository,
};
use labdesk_api::domain::types::{
    Booking, LabTest, OtpChallenge, Report, StoredFile, User,
};
use labdesk_api::error::ApiError;
use labdesk_api::usecase::credential::hash_secret;
use labdesk_domain::booking::{BookingStatus, CollectionType};
use labdesk_domain::principal::{Principal, Subject};
use labdesk_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";
pub const TEST_ADMIN_EMAIL: &str = "admin@labdesk.example";
pub const TEST_ADMIN_PASSWORD: &str = "super-admin-secret";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }

    /// Snapshot ordered by `created_at` ascending — the tie-break the real
    /// repository applies on phone probes.
    fn sorted(&self) -> Vec<User> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by_key(|u| u.created_at);
        users
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError> {
        Ok(self.sorted().into_iter().find(|u| u.phone == phone))
    }

    async fn find_by_phone_fragment(&self, fragment: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .sorted()
            .into_iter()
            .find(|u| u.phone.contains(fragment)))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            if let Some(name) = name {
                user.name = name.to_owned();
            }
            if let Some(phone) = phone {
                user.phone = phone.to_owned();
            }
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── MemoryChallengeCache ─────────────────────────────────────────────────────

pub struct MemoryChallengeCache {
    pub entries: Arc<Mutex<HashMap<String, OtpChallenge>>>,
}

impl MemoryChallengeCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn entries_handle(&self) -> Arc<Mutex<HashMap<String, OtpChallenge>>> {
        Arc::clone(&self.entries)
    }
}

impl ChallengeCache for MemoryChallengeCache {
    async fn put(&self, email: &str, challenge: &OtpChallenge) -> Result<(), ApiError> {
        self.entries
            .lock()
            .unwrap()
            .insert(email.to_owned(), challenge.clone());
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpChallenge>, ApiError> {
        Ok(self.entries.lock().unwrap().get(email).cloned())
    }

    async fn remove(&self, email: &str) -> Result<(), ApiError> {
        self.entries.lock().unwrap().remove(email);
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

pub struct MockMailer {
    pub fail: bool,
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockMailer {
    pub fn working() -> Self {
        Self {
            fail: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl Mailer for MockMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::MailDelivery);
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── MockLabTestRepo ──────────────────────────────────────────────────────────

pub struct MockLabTestRepo {
    pub tests: Arc<Mutex<Vec<LabTest>>>,
}

impl MockLabTestRepo {
    pub fn new(tests: Vec<LabTest>) -> Self {
        Self {
            tests: Arc::new(Mutex::new(tests)),
        }
    }
}

impl LabTestRepository for MockLabTestRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LabTest>, ApiError> {
        Ok(self.tests.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<LabTest>, ApiError> {
        Ok(self.tests.lock().unwrap().clone())
    }

    async fn create(&self, test: &LabTest) -> Result<(), ApiError> {
        self.tests.lock().unwrap().push(test.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tests = self.tests.lock().unwrap();
        let before = tests.len();
        tests.retain(|t| t.id != id);
        Ok(tests.len() < before)
    }
}

// ── MockBookingRepo ──────────────────────────────────────────────────────────

pub struct MockBookingRepo {
    pub bookings: Arc<Mutex<Vec<Booking>>>,
    pub reports: Arc<Mutex<Vec<Report>>>,
}

impl MockBookingRepo {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Arc::new(Mutex::new(bookings)),
            reports: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn bookings_handle(&self) -> Arc<Mutex<Vec<Booking>>> {
        Arc::clone(&self.bookings)
    }

    pub fn reports_handle(&self) -> Arc<Mutex<Vec<Report>>> {
        Arc::clone(&self.reports)
    }
}

impl BookingRepository for MockBookingRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ApiError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, ApiError> {
        Ok(self.bookings.lock().unwrap().clone())
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ApiError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn create(&self, booking: &Booking) -> Result<(), ApiError> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<(), ApiError> {
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(booking) = bookings.iter_mut().find(|b| b.id == id) {
            booking.status = status;
            booking.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn attach_report(&self, report: &Report) -> Result<(), ApiError> {
        // Mirror the transactional contract: link + status in one step.
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(booking) = bookings.iter_mut().find(|b| b.id == report.booking_id) {
            booking.report_id = Some(report.id);
            booking.status = BookingStatus::ReportReady;
            booking.updated_at = Utc::now();
        }
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn find_report(&self, booking_id: Uuid) -> Result<Option<Report>, ApiError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.booking_id == booking_id)
            .cloned())
    }
}

// ── MockFileStore ────────────────────────────────────────────────────────────

pub struct MockFileStore {
    pub fail: bool,
}

impl ReportFileStore for MockFileStore {
    async fn store(&self, _bytes: &[u8], filename: &str) -> Result<StoredFile, ApiError> {
        if self.fail {
            return Err(ApiError::FileStorage);
        }
        Ok(StoredFile {
            url: format!("/reports/{filename}"),
            stored_name: filename.to_owned(),
        })
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_customer(email: &str, phone: &str, password: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        name: "Alice".to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
        password_hash: hash_secret(password).unwrap(),
        role: UserRole::Customer,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_admin_user(email: &str, password: &str) -> User {
    let mut user = test_customer(email, "9000000000", password);
    user.role = UserRole::Admin;
    user
}

pub fn customer_principal(user: &User) -> Principal {
    Principal {
        subject: Subject::User(user.id),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
    }
}

pub fn super_admin_principal() -> Principal {
    Principal::super_admin(TEST_ADMIN_EMAIL)
}

pub fn test_lab_test(name: &str, price: i32) -> LabTest {
    LabTest {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        description: None,
        price,
        created_at: Utc::now(),
    }
}

pub fn test_booking(customer_id: Uuid, status: BookingStatus) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        customer_id,
        test_id: Some(Uuid::new_v4()),
        test_name: "Complete Blood Count".to_owned(),
        test_price: 450,
        scheduled_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        time_slot: "07:00-08:00".to_owned(),
        collection_type: CollectionType::Center,
        address: None,
        status,
        report_id: None,
        created_at: now,
        updated_at: now,
    }
}
