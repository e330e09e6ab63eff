use crate::{error::*, model::*};

use super::{
    extract::{Extractor, NoiExtractor},
    markup,
    session::Session,
    urls,
};

/// Judge operations on top of a [`Session`].
///
/// Listing and problem pages are public; submit and status need a session
/// that went through [`Session::login`].
pub struct Scraper {
    session: Session,
    extractor: Box<dyn Extractor>,
}

impl Scraper {
    pub fn new(session: Session) -> Self {
        Self::with_extractor(session, Box::new(NoiExtractor))
    }

    pub fn with_extractor(session: Session, extractor: Box<dyn Extractor>) -> Self {
        Self { session, extractor }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn login(&mut self) -> Result<()> {
        self.session.login().await
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.session.shutdown().await
    }

    pub async fn get_problems(&self, page: i64) -> Result<Vec<ProblemSummary>> {
        urls::check_page(page)?;
        let opts = self.session.options();
        let driver = self.session.driver()?;

        log::info!("Fetching problem set page {}", page);
        driver.goto(&opts.urls.problemset(page)).await?;
        driver
            .wait_for(markup::RESULT_TABLE, opts.page_timeout)
            .await?;
        let html = driver.outer_html(markup::RESULT_TABLE).await?;

        let rows = self.extractor.problem_rows(&html)?;
        log::debug!("Extracted {} problems", rows.len());
        non_empty(rows)
    }

    pub async fn get_problem(&self, pid: &str) -> Result<ProblemDetail> {
        let opts = self.session.options();
        let driver = self.session.driver()?;

        log::info!("Fetching problem {}", pid);
        driver.goto(&opts.urls.problem(pid)).await?;
        driver
            .wait_for(markup::PROBLEM_CONTAINER, opts.page_timeout)
            .await?;
        let html = driver.outer_html(markup::PROBLEM_CONTAINER).await?;

        self.extractor.problem_detail(&html)
    }

    /// Fills and sends the submit form. Success only means the form was sent;
    /// the verdict has to be polled with [`Scraper::get_status`].
    pub async fn submit(&self, pid: &str, answer: &str) -> Result<()> {
        self.session.ensure_authenticated()?;
        let opts = self.session.options();
        let driver = self.session.driver()?;

        log::info!("Submitting to problem {} ({} bytes)", pid, answer.len());
        driver.goto(&opts.urls.submit(pid)).await?;
        driver
            .wait_for(markup::EDITOR_TOGGLE, opts.editor_timeout)
            .await?;
        driver.click(markup::EDITOR_TOGGLE).await?;
        driver.wait_for(markup::EDITOR, opts.editor_timeout).await?;
        driver.type_into(markup::EDITOR, answer).await?;
        driver
            .select_option_by_text(markup::LANGUAGE_SELECT, &opts.language)
            .await?;
        driver.click(markup::SUBMIT_BUTTON).await?;

        log::info!("Submitted to problem {}", pid);
        Ok(())
    }

    pub async fn get_status(&self, pid: &str) -> Result<Vec<SubmissionStatus>> {
        self.session.ensure_authenticated()?;
        let opts = self.session.options();
        let driver = self.session.driver()?;

        log::info!("Fetching status of problem {}", pid);
        driver
            .goto(&opts.urls.status(self.session.username(), pid))
            .await?;
        driver
            .wait_for(markup::RESULT_TABLE, opts.page_timeout)
            .await?;
        let html = driver.outer_html(markup::RESULT_TABLE).await?;

        let rows = self.extractor.status_rows(&html)?;
        log::debug!("Extracted {} submissions", rows.len());
        non_empty(rows)
    }
}

fn non_empty<T>(rows: Vec<T>) -> Result<Vec<T>> {
    if rows.is_empty() {
        return Err(Error::NoResults);
    }
    Ok(rows)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::{
        driver::mock::{self, Call, MockDriver},
        noi::ClientOptions,
    };

    const PROBLEM_TABLE: &str = r##"
<table class="table">
  <thead><tr><th>Status</th><th>ID</th><th>Title</th></tr></thead>
  <tbody>
    <tr style="height:0px">
      <td class="status"><span class="label label-success">Accepted</span></td>
      <td class="pid"><a href="/oj/index.php/main/show/1001">1001</a></td>
      <td class="title"><a href="#">A+B Problem</a> <span class="label">
        入门</span></td>
      <td class="source"> NOI </td>
      <td class="solvedCount"><a href="#"><span class="badge badge-info">12</span></a></td>
      <td class="submitCount"><a href="#"><span class="badge badge-info">40</span></a></td>
      <td class="avg"><span class="badge badge-info">37.5 pts</span></td>
    </tr>
    <tr><td colspan="7">spacer</td></tr>
    <tr style="height: 0px;">
      <td class="status"></td>
      <td class="pid"><a href="/oj/index.php/main/show/1002">1002</a></td>
      <td class="title"><a href="#">Another</a></td>
      <td class="source">NOIP</td>
      <td class="solvedCount"><a href="#"><span class="badge badge-info">0</span></a></td>
      <td class="submitCount"><a href="#"><span class="badge badge-info">3</span></a></td>
      <td class="avg"><span class="badge badge-info">0 pts</span></td>
    </tr>
  </tbody>
</table>"##;

    fn opts() -> ClientOptions {
        ClientOptions {
            login_settle_delay: Duration::ZERO,
            login_check_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    fn scraper(driver: MockDriver) -> Scraper {
        let session = Session::new(Credentials::new("alice", "pw"), Box::new(driver), opts());
        Scraper::new(session)
    }

    fn login_page(driver: MockDriver) -> MockDriver {
        driver
            .with_element(markup::USERNAME_INPUT)
            .with_element(markup::PASSWORD_INPUT)
            .with_element(markup::REMEMBER_CHECKBOX)
            .with_element(markup::LOGIN_BUTTON)
    }

    async fn logged_in(driver: MockDriver) -> Scraper {
        let mut s = scraper(login_page(driver));
        s.login().await.unwrap();
        s
    }

    #[tokio::test]
    async fn page_out_of_range_never_navigates() {
        let driver = MockDriver::new().with_html(markup::RESULT_TABLE, PROBLEM_TABLE);
        let log = driver.calls();
        let mut s = scraper(driver);

        let too_small = s.get_problems(0).await.unwrap_err();
        assert_eq!(too_small.to_string(), "page number too small");
        let too_big = s.get_problems(26).await.unwrap_err();
        assert_eq!(too_big.to_string(), "page number too big");
        assert_eq!(mock::navigations(&log), 0);

        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn two_zero_height_rows_in_order() {
        let driver = MockDriver::new().with_html(markup::RESULT_TABLE, PROBLEM_TABLE);
        let log = driver.calls();
        let mut s = scraper(driver);

        let rows = s.get_problems(1).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, "Accepted");
        assert_eq!(rows[0].pid, "1001");
        assert_eq!(rows[0].labels, "入门");
        assert_eq!(rows[0].source, "NOI");
        assert_eq!((rows[0].solved, rows[0].submitted), (12, 40));
        assert_eq!(rows[0].avg, "37.5");
        assert_eq!(rows[1].status, "");
        assert_eq!(rows[1].labels, "");
        assert_eq!(rows[1].pid, "1002");

        assert_eq!(
            mock::snapshot(&log)[0],
            Call::Goto("http://oj.noi.cn/oj/index.php/main/problemset/1".to_owned())
        );
        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn table_without_data_rows_is_no_results() {
        let driver = MockDriver::new().with_html(
            markup::RESULT_TABLE,
            r#"<table class="table"><tbody><tr><td>-</td></tr></tbody></table>"#,
        );
        let mut s = scraper(driver);
        assert!(matches!(s.get_problems(25).await, Err(Error::NoResults)));
        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn missing_table_times_out() {
        let mut s = scraper(MockDriver::new());
        let err = s.get_problems(3).await.unwrap_err();
        assert_eq!(err.to_string(), "request timed out");
        assert_eq!(err.kind(), ErrorKind::Timeout);
        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn session_is_reusable_after_timeout() {
        let detail = (1..=6)
            .map(|i| format!("<div class='content'>b{}</div>", i))
            .collect::<String>();
        let driver = MockDriver::new()
            .with_html(markup::PROBLEM_CONTAINER, &format!("<div class='problem'>{}</div>", detail));
        let log = driver.calls();
        let mut s = scraper(driver);

        let err = s.get_problems(3).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(!s.session().is_closed());

        let d = s.get_problem("1001").await.unwrap();
        assert_eq!(d.content, "b1");
        assert_eq!(d.limits, "b6");
        assert_eq!(mock::navigations(&log), 2);
        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn problem_with_too_few_blocks() {
        let driver = MockDriver::new().with_html(
            markup::PROBLEM_CONTAINER,
            r#"<div class="problem"><div class="content">a</div><div class="content">b</div></div>"#,
        );
        let mut s = scraper(driver);
        let err = s.get_problem("1001").await.unwrap_err();
        assert_eq!(err.to_string(), "expected 6 content blocks, found 2");
        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn submit_requires_login() {
        let driver = MockDriver::new();
        let log = driver.calls();
        let mut s = scraper(driver);
        assert!(matches!(
            s.submit("1014", "int main(){}").await,
            Err(Error::NotLoggedIn)
        ));
        assert!(matches!(s.get_status("1014").await, Err(Error::NotLoggedIn)));
        assert_eq!(mock::navigations(&log), 0);
        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn submit_call_order() {
        let driver = MockDriver::new()
            .with_element(markup::EDITOR_TOGGLE)
            .with_element(markup::EDITOR)
            .with_element(markup::SUBMIT_BUTTON)
            .with_options(markup::LANGUAGE_SELECT, ["c", "c++", "pascal"]);
        let log = driver.calls();
        let mut s = logged_in(driver).await;
        log.lock().unwrap().clear();

        s.submit("1014", "int main(){}").await.unwrap();
        assert_eq!(
            mock::snapshot(&log),
            vec![
                Call::Goto("http://oj.noi.cn/oj/index.php/main/submit/1014".to_owned()),
                Call::WaitFor(markup::EDITOR_TOGGLE.to_owned()),
                Call::Click(markup::EDITOR_TOGGLE.to_owned()),
                Call::WaitFor(markup::EDITOR.to_owned()),
                Call::TypeInto(markup::EDITOR.to_owned(), "int main(){}".to_owned()),
                Call::SelectOption(markup::LANGUAGE_SELECT.to_owned(), "c++".to_owned()),
                Call::Click(markup::SUBMIT_BUTTON.to_owned()),
            ]
        );
        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn submit_stops_when_editor_never_appears() {
        let driver = MockDriver::new()
            .with_element(markup::EDITOR_TOGGLE)
            .with_element(markup::SUBMIT_BUTTON)
            .with_options(markup::LANGUAGE_SELECT, ["c++"]);
        let log = driver.calls();
        let mut s = logged_in(driver).await;

        let err = s.submit("1014", "int main(){}").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        let calls = mock::snapshot(&log);
        assert!(!calls.iter().any(|c| matches!(c, Call::TypeInto(sel, _) if sel == markup::EDITOR)));
        assert!(!calls.contains(&Call::Click(markup::SUBMIT_BUTTON.to_owned())));
        s.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn status_with_zero_rows() {
        let driver = MockDriver::new().with_html(
            markup::RESULT_TABLE,
            r#"<table class="table"><thead><tr><th>#</th></tr></thead><tbody></tbody></table>"#,
        );
        let log = driver.calls();
        let mut s = logged_in(driver).await;

        let env = Envelope::from(s.get_status("1001").await);
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            serde_json::json!({"status": "error", "msg": "no results"})
        );
        assert!(mock::snapshot(&log).contains(&Call::Goto(
            "http://oj.noi.cn/oj/index.php/main/status?user=alice&pid=1001".to_owned()
        )));
        s.shutdown().await.unwrap();
    }
}
