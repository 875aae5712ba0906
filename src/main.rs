use xtop::entry;
use xtop::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
