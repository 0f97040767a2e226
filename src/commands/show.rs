//! Show command implementation

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::operations::ShowOperation;

use super::helpers;

pub fn run(args: ShowArgs) -> Result<()> {
    let ctx = helpers::load_installations_context()?;
    ShowOperation::new(&ctx.installations).execute(&args.installation)
}
