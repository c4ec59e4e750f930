//! HTML rendering for the journal page. Consumes the plain data of a
//! [DayView]; no markup leaks into the core modules.

use chrono::{Months, NaiveDate};
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::{journal::service::DayView, utils::time::date_to_key};

pub fn page(view: &DayView, daily_target: u32, today: NaiveDate) -> Markup {
    let title = format!("{daily_target} words");
    let first = view.days[0].date;
    let prev_month = first - Months::new(1);
    let next_month = first + Months::new(1);

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                div #content {
                    h1 #title { a href="/" { (title) } }

                    h2 .month { (view.date.format("%B %Y")) }

                    a href={ "/day/" (date_to_key(prev_month)) } { "⮜" }
                    ul #days {
                        @for day in &view.days {
                            @if day.date <= today && day.words > 0 {
                                a href={ "/day/" (date_to_key(day.date)) }
                                    title={ (day.date.format("%a, %d %b %Y")) " | " (day.words) " words" } {
                                    li class=(day.classes(today, daily_target))
                                        style={ "background-color: rgba(0, 255, 0, " (day.score(daily_target)) ")" } {
                                        (day.date.format("%-d"))
                                    }
                                }
                            } @else {
                                li class=(day.classes(today, daily_target)) { (day.date.format("%-d")) }
                            }
                        }
                    }
                    @if next_month <= today {
                        a href={ "/day/" (date_to_key(next_month)) } { "⮞" }
                    }

                    section #editor {
                        h2 #date { (view.date.format("%A, %B %-d, %Y")) }
                        @if !view.editable {
                            p {
                                "This day is over, so you can't change what you wrote anymore. Try again "
                                a href="/" { "today" }
                                "."
                            }
                        }
                        textarea disabled[!view.editable] { (view.text) }
                        div #stats {
                            span #"word-count" { "0 words" }
                            span #"save-status" {}
                        }
                    }

                    footer {
                        "daywords — write a little every day"
                    }
                }

                script {
                    (PreEscaped(format!("var settings = {{ dailyTarget: {daily_target} }};")))
                }
                script { (PreEscaped(EDITOR_JS)) }
            }
        }
    }
}

const CSS: &str = r#"
#content {
    display: flex;
    flex-direction: column;
    align-items: center;
}

#title a {
    text-decoration: none;
    color: #000;
}

.month {
    margin: 0 0.5em;
}

#days {
    list-style-type: none;
    padding: 0;
    display: flex;
    width: 80vw;
    justify-content: space-around;
}

#days a {
    text-decoration: none;
    color: #000;
}

#days li {
    width: 1.5em;
    height: 1.5em;
    text-align: center;
    border: 1px solid;
    border-radius: 100%;
}

#days .written {
    background-color: rgba(0, 255, 0, 0.2);
}

#days .yay {
    background-color: rgba(0, 255, 0, 0.5);
}

#days .past {
    border-color: lightgreen;
}

#days .future {
    color: #999;
    border-color: #ddd;
}

#editor {
    display: flex;
    flex-direction: column;
}

#editor textarea {
    width: 40em;
    height: 80vh;
    font-size: 15pt;
    font-family: serif;
    line-height: 1.6em;
    border: none;
    resize: none;
    overflow-y: hidden;
    margin-bottom: 2em;
}

#editor textarea:disabled {
    color: #000;
    background-color: #fff;
}

#editor .error {
    color: red;
}

#editor .success {
    color: green;
}

#stats {
    align-self: flex-end;
}

#word-count.yay {
    color: green;
    font-weight: bold;
}

footer {
    color: #999;
}
"#;

const EDITOR_JS: &str = r##"
var editorEl = document.querySelector("#editor textarea");
var wordCountEl = document.querySelector("#word-count");
var statusEl = document.querySelector("#save-status");

var prevCount = 0;
function updateCount() {
    var words = editorEl.value.split(/\s+/);
    var count = words.filter(function(w) { return w.trim() != "" }).length;
    if (count != prevCount) {
        var suffix = count == 1 ? " word" : " words";
        wordCountEl.textContent = count + suffix;

        if (count >= settings.dailyTarget) {
            wordCountEl.classList.add("yay");
        } else {
            wordCountEl.classList.remove("yay");
        }

        prevCount = count;
    }
}

function updateHeight() {
    editorEl.style.height = editorEl.scrollHeight + "px";
}

editorEl.addEventListener("input", function(ev) {
    updateCount();
    updateHeight();
});

document.addEventListener("DOMContentLoaded", function() {
    updateCount();
    updateHeight();
});

document.addEventListener("keydown", function(ev) {
    if (ev.ctrlKey && ev.key == 's') {
        ev.preventDefault();
        saveWords(editorEl.value);
    }
});

function saveWords(words) {
    statusEl.textContent = "…";

    var xhr = new XMLHttpRequest();
    xhr.open("POST", "/save");
    xhr.responseType = "json";

    function saveError() {
        statusEl.textContent = "✗";
        statusEl.classList.add("error");

        if (xhr.status == 0) {
            statusEl.title = "Could not contact server";
        } else {
            statusEl.title = xhr.response.error || "unknown error";
        }
    }

    function saveSuccess() {
        statusEl.textContent = "✓";
        statusEl.classList.remove("error");
        statusEl.title = "";
    }

    xhr.onerror = saveError;

    xhr.onload = function() {
        if (xhr.status >= 400) {
            saveError();
            return;
        }
        saveSuccess();
    };

    xhr.send(JSON.stringify({text: words}));
}
"##;
