//! Embedded tera templates for the admin pages.

use once_cell::sync::Lazy;
use tera::{Context, Tera};

pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("index.html", INDEX_TEMPLATE),
        ("pieces.html", PIECES_TEMPLATE),
        ("builds.html", BUILDS_TEMPLATE),
        ("table.html", TABLE_TEMPLATE),
    ])
    .expect("embedded templates must parse");
    tera
});

pub fn render(template: &str, context: &Context) -> Result<String, tera::Error> {
    TEMPLATES.render(template, context)
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Relic Admin{% endblock %}</title>
    <link rel="stylesheet" href="/static/admin.css">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        {% for link in nav %}<a href="{{ link.href }}">{{ link.label }}</a>{% endfor %}
    </nav>
    <main>
    {% block content %}{% endblock %}
    </main>
</body>
</html>
"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<h1>Relic Admin</h1>
<ul>
{% for link in nav %}
    <li><a href="{{ link.href }}">{{ link.label }}</a></li>
{% endfor %}
</ul>
{% endblock %}
"##;

const PIECES_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ heading }}{% endblock %}
{% block content %}
<h1>{{ heading }}</h1>
{% if error %}<p class="error">{{ error }}</p>{% endif %}

<form method="post" action="{{ action }}" class="editor">
    <h2>{% if editing %}Edit {{ noun }}{% else %}Add New {{ noun }}{% endif %}</h2>
    <input type="hidden" name="mode" value="{{ mode }}">
    <input type="text" name="id" placeholder="ID" value="{{ record.id }}" required{% if editing %} readonly{% endif %}>
    <select name="Relic_Set_id" required>
    {% for opt in set_options %}<option value="{{ opt.value }}"{% if opt.selected %} selected{% endif %}>{{ opt.label }}</option>{% endfor %}
    </select>
    <select name="main_stat" required>
    {% for opt in main_options %}<option value="{{ opt.value }}"{% if opt.selected %} selected{% endif %}>{{ opt.label }}</option>{% endfor %}
    </select>
    <input type="number" name="main_stat_num" placeholder="Main Stat Number" value="{{ record.main_stat_num }}" required>
    {% for sub in substats %}
    <select name="substat_{{ sub.n }}" required>
    {% for opt in sub.options %}<option value="{{ opt.value }}"{% if opt.selected %} selected{% endif %}>{{ opt.label }}</option>{% endfor %}
    </select>
    <input type="number" step="any" name="substat_{{ sub.n }}_num" placeholder="Substat {{ sub.n }} Number" value="{{ sub.value }}" required>
    {% endfor %}
    <button type="submit">{% if editing %}Update {{ noun }}{% else %}Add {{ noun }}{% endif %}</button>
    {% if editing %}<a href="{{ action }}">Cancel</a>{% endif %}
</form>

{% include "table.html" %}
{% endblock %}
"##;

const BUILDS_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ heading }}{% endblock %}
{% block content %}
<h1>{{ heading }}</h1>
{% if error %}<p class="error">{{ error }}</p>{% endif %}

<form method="post" action="{{ action }}" class="editor">
    <h2>{% if editing %}Edit {{ noun }}{% else %}Add New {{ noun }}{% endif %}</h2>
    <input type="hidden" name="mode" value="{{ mode }}">
    <input type="hidden" name="id" value="{{ record.id }}">
    <select name="Playable_Characters_id" required>
    {% for opt in character_options %}<option value="{{ opt.value }}"{% if opt.selected %} selected{% endif %}>{{ opt.label }}</option>{% endfor %}
    </select>
    {% for slot in slots %}
    <select name="{{ slot.field }}" required>
    {% for opt in slot.options %}<option value="{{ opt.value }}"{% if opt.selected %} selected{% endif %}>{{ opt.label }}</option>{% endfor %}
    </select>
    {% endfor %}
    <button type="submit">{% if editing %}Update {{ noun }}{% else %}Add {{ noun }}{% endif %}</button>
    {% if editing %}<a href="{{ action }}">Cancel</a>{% endif %}
</form>

{% include "table.html" %}
{% endblock %}
"##;

const TABLE_TEMPLATE: &str = r##"<table>
    <thead>
        <tr>
        {% for header in table.headers %}<th>{{ header }}</th>{% endfor %}
        <th>Actions</th>
        </tr>
    </thead>
    <tbody>
    {% for row in table.rows %}
        <tr>
        {% for cell in row.cells %}<td>{{ cell }}</td>{% endfor %}
        <td>
            <a class="edit" href="{{ action }}?edit={{ row.id | urlencode_strict }}">Edit</a>
            <form method="post" action="{{ action }}/delete" class="inline">
                <input type="hidden" name="id" value="{{ row.id }}">
                <button type="submit">Delete</button>
            </form>
        </td>
        </tr>
    {% endfor %}
    </tbody>
</table>
"##;
