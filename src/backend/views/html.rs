//! HTML for each view. All user-supplied text goes through [`escape`].

use std::fmt::Write as _;

use crate::backend::auth::types::{LoginField, SignupField};
use crate::backend::middleware::csrf::CSRF_FIELD_NAME;
use crate::backend::snippets::types::{Snippet, SnippetField};
use crate::backend::views::{Page, View};
use crate::shared::form::{Form, FormField};

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn document(page: &Page, view: &View) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!doctype html>\n<html lang='en'>\n<head>\n<meta charset='utf-8'>\n\
         <title>{} - Snippetbox</title>\n</head>\n<body>\n\
         <header><h1><a href='/'>Snippetbox</a></h1></header>\n",
        view.title()
    );
    html.push_str(&nav(page));
    html.push_str("<main>\n");
    if let Some(flash) = &page.flash {
        let _ = writeln!(html, "<div class='flash'>{}</div>", escape(flash));
    }
    html.push_str(&body(page, view));
    let _ = write!(
        html,
        "</main>\n<footer>Powered by Rust in {}</footer>\n</body>\n</html>\n",
        page.current_year
    );
    html
}

fn nav(page: &Page) -> String {
    let mut html = String::from("<nav>\n<div><a href='/'>Home</a> <a href='/about'>About</a>");
    if page.is_authenticated {
        html.push_str(" <a href='/snippet/create'>Create snippet</a>");
    }
    html.push_str("</div>\n<div>");
    if page.is_authenticated {
        let _ = write!(
            html,
            "<form action='/user/logout' method='POST'>{}<button>Logout</button></form>",
            csrf_input(page)
        );
    } else {
        html.push_str("<a href='/user/signup'>Signup</a> <a href='/user/login'>Login</a>");
    }
    html.push_str("</div>\n</nav>\n");
    html
}

fn body(page: &Page, view: &View) -> String {
    match view {
        View::Home { snippets } => home(snippets),
        View::About => {
            "<h2>About</h2>\n<p>A great about page. Snippetbox lets you paste and share \
             snippets of text that expire after a chosen number of days.</p>\n"
                .to_string()
        }
        View::ShowSnippet { snippet } => show_snippet(snippet),
        View::CreateSnippet { form } => create_snippet(page, form),
        View::Signup { form } => signup(page, form),
        View::Login { form } => login(page, form),
    }
}

fn csrf_input(page: &Page) -> String {
    format!(
        "<input type='hidden' name='{}' value='{}'>",
        CSRF_FIELD_NAME,
        escape(&page.csrf_token)
    )
}

fn field_errors<F: FormField>(form: &Form<F>, field: F) -> String {
    form.errors(field)
        .iter()
        .map(|message| format!("<label class='error'>{}</label>\n", escape(message)))
        .collect()
}

fn non_field_errors<F: FormField>(form: &Form<F>) -> String {
    form.non_field_errors()
        .iter()
        .map(|message| format!("<div class='error'>{}</div>\n", escape(message)))
        .collect()
}

fn text_input<F: FormField>(form: &Form<F>, field: F, label: &str, kind: &str) -> String {
    let value = if kind == "password" {
        String::new()
    } else {
        escape(form.get(field))
    };
    format!(
        "<div>\n<label>{}:</label>\n{}<input type='{}' name='{}' value='{}'>\n</div>\n",
        label,
        field_errors(form, field),
        kind,
        field.name(),
        value
    )
}

fn home(snippets: &[Snippet]) -> String {
    let mut html = String::from("<h2>Latest Snippets</h2>\n");
    if snippets.is_empty() {
        html.push_str("<p>There's nothing to see here... yet!</p>\n");
        return html;
    }
    html.push_str("<table>\n<tr><th>Title</th><th>Created</th><th>ID</th></tr>\n");
    for snippet in snippets {
        let _ = writeln!(
            html,
            "<tr><td><a href='/snippet/{id}'>{title}</a></td><td>{created}</td><td>#{id}</td></tr>",
            id = snippet.id,
            title = escape(&snippet.title),
            created = snippet.created.format("%d %b %Y at %H:%M"),
        );
    }
    html.push_str("</table>\n");
    html
}

fn show_snippet(snippet: &Snippet) -> String {
    format!(
        "<div class='snippet'>\n<div class='metadata'><strong>{title}</strong><span>#{id}</span></div>\n\
         <pre><code>{content}</code></pre>\n\
         <div class='metadata'><time>Created: {created}</time><time>Expires: {expires}</time></div>\n</div>\n",
        title = escape(&snippet.title),
        id = snippet.id,
        content = escape(&snippet.content),
        created = snippet.created.format("%d %b %Y at %H:%M"),
        expires = snippet.expires.format("%d %b %Y at %H:%M"),
    )
}

fn create_snippet(page: &Page, form: &Form<SnippetField>) -> String {
    let mut html = String::from("<form action='/snippet/create' method='POST'>\n");
    html.push_str(&csrf_input(page));
    html.push('\n');
    html.push_str(&text_input(form, SnippetField::Title, "Title", "text"));
    let _ = write!(
        html,
        "<div>\n<label>Content:</label>\n{}<textarea name='content'>{}</textarea>\n</div>\n",
        field_errors(form, SnippetField::Content),
        escape(form.get(SnippetField::Content))
    );

    let expires = match form.get(SnippetField::Expires) {
        "" => "365",
        value => value,
    };
    let _ = write!(
        html,
        "<div>\n<label>Delete in:</label>\n{}",
        field_errors(form, SnippetField::Expires)
    );
    for (value, label) in [("365", "One Year"), ("7", "One Week"), ("1", "One Day")] {
        let checked = if expires == value { " checked" } else { "" };
        let _ = writeln!(
            html,
            "<input type='radio' name='expires' value='{}'{}> {}",
            value, checked, label
        );
    }
    html.push_str("</div>\n<div><input type='submit' value='Publish snippet'></div>\n</form>\n");
    html
}

fn signup(page: &Page, form: &Form<SignupField>) -> String {
    let mut html = String::from("<form action='/user/signup' method='POST' novalidate>\n");
    html.push_str(&csrf_input(page));
    html.push('\n');
    html.push_str(&text_input(form, SignupField::Name, "Name", "text"));
    html.push_str(&text_input(form, SignupField::Email, "Email", "email"));
    html.push_str(&text_input(form, SignupField::Password, "Password", "password"));
    html.push_str("<div><input type='submit' value='Signup'></div>\n</form>\n");
    html
}

fn login(page: &Page, form: &Form<LoginField>) -> String {
    let mut html = String::from("<form action='/user/login' method='POST' novalidate>\n");
    html.push_str(&csrf_input(page));
    html.push('\n');
    html.push_str(&non_field_errors(form));
    html.push_str(&text_input(form, LoginField::Email, "Email", "email"));
    html.push_str(&text_input(form, LoginField::Password, "Password", "password"));
    html.push_str("<div><input type='submit' value='Login'></div>\n</form>\n");
    html
}
