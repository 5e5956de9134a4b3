pub mod atcoder {
    pub const BASE_URL: &str = "https://atcoder.jp";
    pub const LOGIN_MARKER: &str = "UserScreenName%3A";
}
pub mod http {
    use std::time::Duration;
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:78.0) Gecko/20100101 Firefox/78.0";
    pub const TIMEOUT: Duration = Duration::from_secs(30);
    pub const VERBOSE: bool = false;
}
pub mod retry {
    use std::time::Duration;
    pub const RETRY_COUNT: u32 = 3;
    pub const RETRY_DELAY: Duration = Duration::from_millis(200);
}
pub mod sample {
    pub const INPUT_JA: &str = "入力例";
    pub const OUTPUT_JA: &str = "出力例";
    pub const INPUT_EN: &str = "Sample Input";
    pub const OUTPUT_EN: &str = "Sample Output";
    pub const HEADING_DEPTH: usize = 2;
}
pub mod cache {
    pub const DIR_NAME: &str = ".atctest";
}
