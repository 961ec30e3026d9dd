mod service_account;

pub use service_account::{DATASTORE_SCOPE, ServiceAccountMinter};
