use hostprobe::error::AppResult;

fn main() -> AppResult<()> {
    hostprobe::run()
}
