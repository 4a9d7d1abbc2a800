/// Code that unlocks the admin view.
///
/// This is a fixed client-side literal used as a UI convenience gate. It is
/// not a credential and protects nothing on the server.
pub const DEFAULT_ADMIN_ACCESS_CODE: &str = "123123";

/// Address shown to visitors who want to adopt an animal
pub const DEFAULT_ADOPTION_CONTACT_EMAIL: &str = "123@gmail.com";

/// Multipart field name under which every picture is sent
pub const PICTURES_FIELD: &str = "pictures";

/// Default value of a fresh draft's status field
pub const DEFAULT_DRAFT_STATUS: &str = "Available";

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

pub const INCORRECT_CODE_MESSAGE: &str = "Incorrect code.";

pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this cat?";

pub const CHALLENGE_PROMPT: &str = "Enter admin access code:";

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch cats";

pub const ADD_FAILED_MESSAGE: &str = "Failed to add cat";

pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete cat";

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Dataset label used by every chart
pub const CHART_DATASET_LABEL: &str = "Number of Cats";
