use ojspider_webclient::noi::{Extractor as _, NoiExtractor};
use ojspider_webclient::*;

const DETAIL: &str = r#"
<div class="problem">
  <h2>1001 A+B Problem</h2>
  <div class="content">
    Compute a + b.
  </div>
  <div class="content">Two integers a and b.</div>
  <div class="content">Their sum.</div>
  <div class="content"><pre>1 2</pre></div>
  <div class="content"><pre>3</pre></div>
  <div class="content">
    Time: 1s
    Memory: 128MB
  </div>
</div>"#;

const STATUS: &str = r#"
<table class="table">
  <thead>
    <tr><th>#</th><th>Problem</th><th>User</th><th>Result</th><th>Time</th>
        <th>Memory</th><th>Lang</th><th>Length</th><th>Submitted</th></tr>
  </thead>
  <tbody>
    <tr>
      <td>98765</td><td>1001</td><td>alice</td>
      <td><span class="label label-success">
        Accepted</span> <span class="badge">100</span></td>
      <td>12ms</td><td>1.2MB</td><td>C++</td><td>210B</td><td>2020-10-01 12:00:00</td>
    </tr>
    <tr>
      <td>98764</td><td>1001</td><td>alice</td>
      <td>Compiling</td>
      <td>-</td><td>-</td><td>C++</td><td>199B</td><td>2020-10-01 11:59:00</td>
    </tr>
    <tr>
      <td>98763</td><td>1001</td><td>alice</td>
      <td>Partially <span class="badge">40</span></td>
      <td>20ms</td><td>1.0MB</td><td>C++</td><td>180B</td><td>2020-10-01 11:50:00</td>
    </tr>
  </tbody>
</table>"#;

#[test]
fn detail_blocks_are_positional() {
    let d = NoiExtractor.problem_detail(DETAIL).unwrap();
    assert_eq!(d.content, "Compute a + b.");
    assert_eq!(d.input, "Two integers a and b.");
    assert_eq!(d.output, "Their sum.");
    assert_eq!(d.sample_input, "1 2");
    assert_eq!(d.sample_output, "3");
    assert!(d.limits.starts_with("Time: 1s"));
    assert!(d.limits.ends_with("Memory: 128MB"));
}

#[test]
fn detail_with_missing_blocks() {
    let err = NoiExtractor
        .problem_detail(r#"<div class="problem"><div class="content">x</div></div>"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ElementNotFound);
    assert_eq!(
        serde_json::to_value(Envelope::from(&err)).unwrap(),
        serde_json::json!({"status": "error", "msg": "expected 6 content blocks, found 1"})
    );
}

#[test]
fn status_rows_by_cell_position() {
    let rows = NoiExtractor.status_rows(STATUS).unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(
        rows[0],
        SubmissionStatus {
            index: "98765".to_owned(),
            pid: "1001".to_owned(),
            user: "alice".to_owned(),
            status: "Accepted".to_owned(),
            score: 100,
            time: "12ms".to_owned(),
            memory: "1.2MB".to_owned(),
            language: "C++".to_owned(),
            code_length: "210B".to_owned(),
            submit_time: "2020-10-01 12:00:00".to_owned(),
        }
    );

    // no label, no badge
    assert_eq!(rows[1].status, "Compiling");
    assert_eq!(rows[1].score, 0);

    // no label, badge text is not part of the status
    assert_eq!(rows[2].status, "Partially");
    assert_eq!(rows[2].score, 40);
}

#[test]
fn non_numeric_score_is_malformed() {
    let html = STATUS.replace(r#"<span class="badge">100</span>"#, r#"<span class="badge">n/a</span>"#);
    let err = NoiExtractor.status_rows(&html).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn problem_row_missing_pid_names_selector() {
    let html = r#"
<table class="table"><tbody>
  <tr style="height:0px">
    <td class="status"></td>
    <td class="title"><a>No pid</a></td>
  </tr>
</tbody></table>"#;
    match NoiExtractor.problem_rows(html) {
        Err(Error::NoSuchElement(sel)) => assert_eq!(sel, "td.pid a"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn problem_row_with_bad_count() {
    let html = r#"
<table class="table"><tbody>
  <tr style="height:0px">
    <td class="pid"><a>1001</a></td>
    <td class="title"><a>A+B</a></td>
    <td class="source">NOI</td>
    <td class="solvedCount"><a><span class="badge-info">many</span></a></td>
    <td class="submitCount"><a><span class="badge-info">3</span></a></td>
    <td class="avg"><span class="badge-info">1 pts</span></td>
  </tr>
</tbody></table>"#;
    let err = NoiExtractor.problem_rows(html).unwrap_err();
    assert_eq!(err.to_string(), "Unexpected text 'many' in solved");
}
