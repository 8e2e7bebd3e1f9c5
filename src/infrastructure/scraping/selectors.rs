//! CSS selectors for the rendered profile pages

// Login form
pub const LOGIN_EMAIL_INPUT: &str = "input[name='session_key']";
pub const LOGIN_PASSWORD_INPUT: &str = "input[name='session_password']";
pub const LOGIN_SUBMIT_BUTTON: &str = "button[type='submit']";

/// Fragments of the post-login URL that mean the login did not go through
pub const LOGIN_REJECTION_MARKERS: &[&str] = &["/login", "/checkpoint"];

// Profile header
pub const HEADER_CONTAINER: &str = "div.mt2.relative";
pub const HEADER_NAME: &str = "h1.text-heading-xlarge, div.mt2.relative h1";
pub const HEADER_TITLE: &str = "div.text-body-medium";
pub const HEADER_LOCATION: &str = "span.text-body-small.inline.t-black--light";

// Experience and education detail pages share one list layout
pub const DETAILS_CONTAINER: &str = "div.scaffold-finite-scroll__content";
pub const DETAILS_ITEM: &str = "li.pvs-list__paged-list-item";
pub const ITEM_HEADLINE: &str =
    "div.display-flex.align-items-center.mr1.hoverable-link-text.t-bold span[aria-hidden='true']";
pub const ITEM_SUBTITLE: &str = "span.t-14.t-normal span[aria-hidden='true']";
pub const ITEM_CAPTION: &str = "span.pvs-entity__caption-wrapper[aria-hidden='true']";
/// The first match is the date range, the second the location
pub const ITEM_LIGHT_TEXT: &str = "span.t-14.t-normal.t-black--light span[aria-hidden='true']";

// Activity feed
pub const POSTS_CONTAINER: &str =
    "div.update-components-text.relative.update-components-update-v2__commentary";
pub const POST_TEXT: &str =
    "div.update-components-text.relative.update-components-update-v2__commentary span.break-words";

// Sub-paths relative to the normalized profile URL
pub const EXPERIENCE_PATH: &str = "details/experience/";
pub const EDUCATION_PATH: &str = "details/education/";
pub const ACTIVITY_PATH: &str = "recent-activity/all/";
