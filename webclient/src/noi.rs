pub mod extract;
pub mod markup;
pub mod options;
pub mod scraper;
pub mod session;
pub mod urls;

pub use self::scraper::*;
pub use extract::*;
pub use options::*;
pub use session::*;
pub use urls::*;
