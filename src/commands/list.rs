//! List command implementation

use crate::error::Result;
use crate::operations::ListOperation;

use super::helpers;

/// Run list command
pub fn run() -> Result<()> {
    let ctx = helpers::load_installations_context()?;
    ListOperation::new(&ctx.installations).execute()
}
