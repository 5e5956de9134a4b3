use actix_web::{http::header, web, App, HttpRequest, HttpResponse, HttpServer};
use atc_tester::{
    account::Account,
    atcoder::Kind,
    cache::SampleCache,
    tester::{Access, Options, Target, Tester},
    types::Sample,
};
use std::collections::HashMap;

const SESSION_COOKIE: &str = "REVEL_SESSION=0123-%00UserScreenName%3Aalice%00; Path=/; HttpOnly";

const PROBLEM: &str = r#"<html><body><span class="lang-ja">
<div class="part"><section><h3>問題文</h3><p>N を 2 乗してください。</p></section></div>
<div class="part"><section><h3>入力例 1</h3><pre>3
</pre></section></div>
<div class="part"><section><h3>出力例 1</h3><pre>9
</pre></section></div>
<div class="part"><section><h3>入力例 2</h3><pre>5
</pre></section></div>
<div class="part"><section><h3>出力例 2</h3><pre>25
</pre></section></div>
</span></body></html>"#;

const TASKS: &str = r#"<html><body><table><tbody>
<tr><td><a href="/contests/abc999/tasks/abc999_a">A</a></td><td><a href="/contests/abc999/tasks/abc999_a">Sum</a></td></tr>
<tr><td><a href="/contests/abc999/tasks/abc999_b">B</a></td><td><a href="/contests/abc999/tasks/abc999_b">Square</a></td></tr>
</tbody></table></body></html>"#;

/// Whether the site is in the middle of a contest. Task pages of a running
/// contest are only shown to a logged in session.
struct Site {
    held: bool,
}
impl Site {
    fn hides_tasks_from(&self, request: &HttpRequest) -> bool {
        let logged_in = request
            .headers()
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |cookie| cookie.contains("UserScreenName%3Aalice"));
        self.held && !logged_in
    }
}

fn html(body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body.to_owned())
}

async fn contest(site: web::Data<Site>) -> HttpResponse {
    let button = if site.held {
        r#"<form action="/contests/abc999/register" method="POST"><button class="btn btn-lg btn-primary center-block">Register</button></form>"#
    } else {
        ""
    };
    html(&format!("<html><body>{}</body></html>", button))
}

async fn login_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .append_header((header::SET_COOKIE, "REVEL_SESSION=anonymous; Path=/"))
        .body(r#"<form method="POST"><input type="hidden" name="csrf_token" value="tok123"></form>"#)
}

async fn login(form: web::Form<HashMap<String, String>>) -> HttpResponse {
    let field = |name: &str| form.get(name).map(String::as_str);
    let valid = field("username") == Some("alice")
        && field("password") == Some("secret")
        && field("csrf_token") == Some("tok123");
    let mut response = HttpResponse::Ok();
    if valid {
        response.append_header((header::SET_COOKIE, SESSION_COOKIE));
    }
    response.body("<html></html>")
}

async fn tasks(site: web::Data<Site>, request: HttpRequest) -> HttpResponse {
    if site.hides_tasks_from(&request) {
        return HttpResponse::Forbidden().finish();
    }
    html(TASKS)
}

async fn task(site: web::Data<Site>, request: HttpRequest, id: web::Path<String>) -> HttpResponse {
    if site.hides_tasks_from(&request) {
        return HttpResponse::Forbidden().finish();
    }
    match id.as_str() {
        "abc999_b" => html(PROBLEM),
        "abc999_a" => html("<html><body><p>no samples</p></body></html>"),
        _ => HttpResponse::NotFound().finish(),
    }
}

/// Serves a fake contest site on a free local port and returns its base url.
fn start_site(held: bool) -> String {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Site { held }))
            .route("/contests/abc999", web::get().to(contest))
            .route("/contests/abc999/tasks", web::get().to(tasks))
            .route("/contests/abc999/tasks/{id}", web::get().to(task))
            .route("/login", web::get().to(login_page))
            .route("/login", web::post().to(login))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

fn options(base_url: &str, target: Target, account: Option<Account>) -> Options {
    let mut options = Options::new(target, "read n; echo $((n * n))".to_owned());
    options.base_url = base_url.to_owned();
    options.account = account;
    options
}

fn label(label: &str) -> Target {
    Target::Label {
        contest: "ABC999".to_owned(),
        label: label.to_owned(),
    }
}

fn alice(password: &str) -> Option<Account> {
    Some(Account::new("alice".to_owned(), password.to_owned()))
}

fn expected() -> Vec<Sample> {
    vec![Sample::new("3\n", "9\n"), Sample::new("5\n", "25\n")]
}

#[actix_web::test]
async fn running_contest_keeps_login_for_later_pages() {
    let base = start_site(true);
    let dir = tempfile::tempdir().unwrap();
    let mut options = options(&base, label("b"), alice("secret"));
    options.cache_dir = Some(dir.path().to_owned());
    let tester = Tester::new(options).unwrap();

    assert_eq!(tester.prepare().await.unwrap(), Access::LoggedIn);
    assert!(tester.session().is_logged_in("alice"));
    let url = tester.problem_url().await.unwrap();
    assert_eq!(url, format!("{}/contests/abc999/tasks/abc999_b", base));
    assert_eq!(tester.samples(&url).await.unwrap(), expected());
    assert_eq!(SampleCache::new(dir.path()).lookup(&url), Some(expected()));
}

#[cfg(unix)]
#[actix_web::test]
async fn checks_program_against_fetched_samples() {
    let base = start_site(false);
    let tester = Tester::new(options(&base, label("B"), None)).unwrap();
    assert_eq!(tester.prepare().await.unwrap(), Access::Open);
    let url = tester.problem_url().await.unwrap();
    let samples = tester.samples(&url).await.unwrap();

    let mut out = termcolor::Buffer::no_color();
    assert!(tester.check(&samples, &mut out).await.unwrap());
    assert_eq!(
        String::from_utf8(out.into_inner()).unwrap(),
        "sample 1: SUCCESS\nsample 2: SUCCESS\n"
    );
}

#[actix_web::test]
async fn without_login_gated_pages_fail_to_fetch() {
    let base = start_site(true);
    let tester = Tester::new(options(&base, label("B"), None)).unwrap();
    let err = tester.problem_url().await.unwrap_err();
    assert!(matches!(err.kind(), Kind::Fetch { .. }));
}

#[actix_web::test]
async fn running_contest_needs_credentials() {
    let base = start_site(true);
    let tester = Tester::new(options(&base, label("B"), None)).unwrap();
    let err = tester.prepare().await.unwrap_err();
    assert!(matches!(err.kind(), Kind::MissingCredentials));
}

#[actix_web::test]
async fn wrong_password_is_reported() {
    let base = start_site(true);
    let tester = Tester::new(options(&base, label("B"), alice("wrong"))).unwrap();
    let err = tester.prepare().await.unwrap_err();
    assert!(matches!(err.kind(), Kind::LoginFailed(name) if name == "alice"));
}

#[actix_web::test]
async fn unknown_label_is_not_found() {
    let base = start_site(false);
    let tester = Tester::new(options(&base, label("Z"), None)).unwrap();
    let err = tester.problem_url().await.unwrap_err();
    assert!(matches!(err.kind(), Kind::ProblemNotFound { .. }));
}

#[actix_web::test]
async fn direct_url_without_samples() {
    let base = start_site(false);
    let url = format!("{}/contests/abc999/tasks/abc999_a", base);
    let tester = Tester::new(options(&base, Target::Url(url.clone()), None)).unwrap();
    assert_eq!(tester.contest_url().unwrap(), format!("{}/contests/abc999", base));
    assert_eq!(tester.prepare().await.unwrap(), Access::Open);
    assert_eq!(tester.problem_url().await.unwrap(), url);
    let err = tester.samples(&url).await.unwrap_err();
    assert!(matches!(err.kind(), Kind::NoSamples));
}
