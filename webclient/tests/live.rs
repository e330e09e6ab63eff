//! Runs against oj.noi.cn with a real Chromium.
//! `cargo test -p ojspider-webclient --test live -- --ignored`

use ojspider_webclient::driver::ChromiumLauncher;
use ojspider_webclient::*;

use testconfig::TestConfig;

#[tokio::test]
#[ignore = "needs Chromium and network access"]
async fn fetch_first_page_and_first_problem() {
    let launcher = ChromiumLauncher::default();
    let cred = Credentials::new("guest", "guest");
    let mut s = open_scraper(&launcher, cred, ClientOptions::default())
        .await
        .unwrap();

    let problems = s.get_problems(1).await;
    let detail = match &problems {
        Ok(rows) => Some(s.get_problem(&rows[0].pid).await),
        Err(_) => None,
    };
    s.shutdown().await.unwrap();

    let problems = problems.unwrap();
    assert!(!problems.is_empty());
    let detail = detail.unwrap().unwrap();
    assert!(!detail.content.is_empty());
}

#[tokio::test]
#[ignore = "needs Chromium, network access and OJSPIDER_TEST_* credentials"]
async fn login_and_read_status() {
    let cfg = TestConfig::from_env();
    let launcher = ChromiumLauncher::default();
    let cred = Credentials::new(cfg.username, cfg.password);
    let mut s = open_scraper(&launcher, cred, ClientOptions::default())
        .await
        .unwrap();

    let login = s.login().await;
    let status = if login.is_ok() {
        Some(s.get_status("1001").await)
    } else {
        None
    };
    s.shutdown().await.unwrap();

    login.unwrap();
    match status.unwrap() {
        Ok(rows) => assert!(rows.iter().all(|r| r.user == s.session().username())),
        Err(e) => assert_eq!(e.kind(), ErrorKind::EmptyResult),
    }
}

#[tokio::test]
#[ignore = "needs Chromium and network access"]
async fn wrong_password_is_rejected() {
    let launcher = ChromiumLauncher::default();
    let cred = Credentials::new("ojspider-nobody", "definitely-wrong");
    let mut s = open_scraper(&launcher, cred, ClientOptions::default())
        .await
        .unwrap();

    let login = s.login().await;
    s.shutdown().await.unwrap();

    let err = login.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    assert!(!err.to_string().is_empty());
}
