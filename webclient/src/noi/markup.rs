//! CSS selectors of oj.noi.cn as of the 2020 site revision.
//! These break first when the site is redesigned.

// login form (site root)
pub const USERNAME_INPUT: &str = "#username";
pub const PASSWORD_INPUT: &str = "#ori_passwd";
pub const REMEMBER_CHECKBOX: &str = "input[name='remember']";
pub const LOGIN_BUTTON: &str = ".pull-right";
pub const LOGIN_ERROR: &str = "span.alert-error";

// problem set and status pages
pub const RESULT_TABLE: &str = ".table";

// problem page
pub const PROBLEM_CONTAINER: &str = ".problem";

// submit page
pub const EDITOR_TOGGLE: &str = ".toggle_editor";
pub const EDITOR: &str = ".submit-editor";
pub const LANGUAGE_SELECT: &str = "select[name='language']";
pub const SUBMIT_BUTTON: &str = "#submit_button";
