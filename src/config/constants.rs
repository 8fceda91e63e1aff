//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Store
// =============================================================================

/// Default SQLite location for the durable store
pub const DEFAULT_DATABASE_URL: &str = "sqlite://hotel-ops.db?mode=rwc";

/// Connection string for a throwaway SQLite database
pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Store backend identifiers accepted by `HOTEL_OPS_STORE`
pub const STORE_BACKEND_SQLITE: &str = "sqlite";
pub const STORE_BACKEND_MEMORY: &str = "memory";

/// Primary key field shared by every collection
pub const PRIMARY_KEY: &str = "id";

// =============================================================================
// Collections
// =============================================================================

pub const COLLECTION_USERS: &str = "users";
pub const COLLECTION_HOTELS: &str = "hotels";
pub const COLLECTION_ROOMS: &str = "rooms";
pub const COLLECTION_RESERVATIONS: &str = "reservations";
pub const COLLECTION_PAYMENTS: &str = "payments";
pub const COLLECTION_NOTIFICATIONS: &str = "notifications";

// =============================================================================
// User Roles
// =============================================================================

/// Administrator role, sees every hotel
pub const ROLE_ADMIN: &str = "admin";

/// Front desk role, bound to one hotel
pub const ROLE_STAFF: &str = "staff";

// =============================================================================
// Seeding
// =============================================================================

/// Default administrator account created on first run
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@hotel.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin12345";
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Default staff account created on first run
pub const DEFAULT_STAFF_EMAIL: &str = "staff@hotel.com";
pub const DEFAULT_STAFF_PASSWORD: &str = "staff12345";
pub const DEFAULT_STAFF_NAME: &str = "Front Desk Plaza";

// =============================================================================
// Payments
// =============================================================================

/// Payment method recorded when none is given
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

// =============================================================================
// Stays
// =============================================================================

/// Standard arrival and departure hours (UTC) when only dates are given
pub const CHECK_IN_HOUR: u32 = 15;
pub const CHECK_OUT_HOUR: u32 = 11;

// =============================================================================
// Notification titles
// =============================================================================

pub const TITLE_RESERVATION_CREATED: &str = "New Reservation";
pub const TITLE_RESERVATION_CANCELLED: &str = "Reservation Cancelled";
pub const TITLE_CHECK_IN: &str = "Check-in Completed";
pub const TITLE_CHECK_OUT: &str = "Check-out Completed";
pub const TITLE_PAYMENT_RECEIVED: &str = "Payment Received";
pub const TITLE_CLEANING_REQUIRED: &str = "Cleaning Required";
pub const TITLE_MAINTENANCE_REQUIRED: &str = "Maintenance Required";
pub const TITLE_CHECK_IN_REMINDER: &str = "Check-in Reminder";

// =============================================================================
// Reporting
// =============================================================================

/// Seconds in one room-night
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Upper bound for every occupancy figure
pub const MAX_OCCUPANCY_RATE: f64 = 100.0;

/// Rates are rounded to this many decimals
pub const RATE_DECIMALS: i32 = 2;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;
