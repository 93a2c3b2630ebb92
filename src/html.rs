//! HTML dashboard generator with Chart.js

use crate::data::Commit;
use crate::error::Result;
use crate::session::Session;
use crate::view::ViewModel;
use minijinja::{context, Environment};
use std::path::Path;

/// HTML template for the user dashboard
const DASHBOARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <style>
        :root {
            --bg-primary: #0d1117;
            --bg-secondary: #161b22;
            --bg-tertiary: #21262d;
            --text-primary: #c9d1d9;
            --text-secondary: #8b949e;
            --text-muted: #6e7681;
            --border-color: #30363d;
            --accent-blue: #58a6ff;
            --accent-green: #3fb950;
            --accent-purple: #a371f7;
        }

        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
            min-height: 100vh;
        }

        .container {
            max-width: 1200px;
            margin: 0 auto;
            padding: 2rem;
        }

        .profile-card {
            display: flex;
            gap: 1.5rem;
            align-items: center;
            padding: 2rem;
            margin-bottom: 2rem;
            background: linear-gradient(135deg, var(--bg-secondary) 0%, var(--bg-tertiary) 100%);
            border: 1px solid var(--border-color);
            border-radius: 16px;
        }

        .profile-card img {
            width: 96px;
            height: 96px;
            border-radius: 50%;
            border: 2px solid var(--border-color);
        }

        .profile-card h1 {
            font-size: 1.75rem;
            font-weight: 600;
        }

        .profile-card .login {
            color: var(--accent-blue);
            font-size: 1rem;
        }

        .profile-card .meta {
            color: var(--text-secondary);
            font-size: 0.9rem;
        }

        .stats-row {
            display: flex;
            gap: 1rem;
            margin-bottom: 2rem;
            flex-wrap: wrap;
        }

        .stat-pill {
            flex: 1;
            min-width: 160px;
            padding: 1rem 1.5rem;
            background: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 12px;
        }

        .stat-pill .value {
            font-size: 1.5rem;
            font-weight: 600;
            color: var(--accent-blue);
        }

        .stat-pill .name {
            color: var(--text-secondary);
            font-size: 0.85rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
        }

        .panel {
            background: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 12px;
            margin-bottom: 2rem;
            overflow: hidden;
        }

        .panel-header {
            padding: 1.25rem 1.5rem;
            background: var(--bg-tertiary);
            border-bottom: 1px solid var(--border-color);
            display: flex;
            justify-content: space-between;
            align-items: center;
        }

        .panel-header h2 {
            font-size: 1.25rem;
            font-weight: 600;
        }

        .chart-container {
            padding: 1.5rem;
            height: 360px;
            position: relative;
        }

        table {
            width: 100%;
            border-collapse: collapse;
        }

        th, td {
            padding: 0.85rem 1.5rem;
            text-align: left;
            border-top: 1px solid var(--border-color);
        }

        th {
            background: var(--bg-tertiary);
            color: var(--text-secondary);
            font-weight: 500;
            font-size: 0.85rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
        }

        tr:hover {
            background: var(--bg-tertiary);
        }

        .mono {
            font-family: 'SF Mono', 'Fira Code', monospace;
            color: var(--accent-purple);
        }

        .repo-name {
            color: var(--accent-blue);
            text-decoration: none;
            font-weight: 600;
        }

        .repo-name:hover {
            text-decoration: underline;
        }

        .muted {
            color: var(--text-muted);
        }

        .pager {
            display: flex;
            gap: 0.4rem;
            align-items: center;
            padding: 1rem 1.5rem;
            border-top: 1px solid var(--border-color);
        }

        .pager button {
            background: var(--bg-tertiary);
            border: 1px solid var(--border-color);
            color: var(--text-primary);
            padding: 0.3rem 0.7rem;
            border-radius: 6px;
            cursor: pointer;
        }

        .pager button.active {
            background: var(--accent-blue);
            color: var(--bg-primary);
        }

        .pager button:disabled {
            color: var(--text-muted);
            cursor: default;
        }

        .pager select {
            background: var(--bg-tertiary);
            border: 1px solid var(--border-color);
            color: var(--text-primary);
            padding: 0.3rem;
            border-radius: 6px;
            margin-left: auto;
        }

        .empty-state {
            text-align: center;
            padding: 3rem;
            color: var(--text-muted);
        }

        footer {
            text-align: center;
            padding: 2rem;
            color: var(--text-muted);
            font-size: 0.9rem;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="profile-card">
            <img src="{{ profile.avatar_url }}" alt="{{ profile.login }}">
            <div>
                <h1>{{ profile.name | default(profile.login) }}</h1>
                <p class="login">@{{ profile.login }}</p>
                {% if profile.bio %}<p class="meta">{{ profile.bio }}</p>{% endif %}
                <p class="meta">
                    {{ profile.followers }} followers · {{ profile.following }} following ·
                    {{ profile.public_repos }} public repos · joined {{ joined }}
                </p>
            </div>
        </div>

        <div class="stats-row">
            <div class="stat-pill">
                <div class="value">{{ stats.total }}</div>
                <div class="name">Contributions · {{ period_label }}</div>
            </div>
            <div class="stat-pill">
                <div class="value">{{ stats.avg_per_day }}</div>
                <div class="name">Average / Day</div>
            </div>
            <div class="stat-pill">
                <div class="value">{{ stats.most_active_label }}</div>
                <div class="name">Most Active ({{ stats.most_active_value }})</div>
            </div>
        </div>

        <div class="panel">
            <div class="panel-header">
                <h2>Contribution Activity</h2>
                <span class="muted">{{ period_label }}</span>
            </div>
            <div class="chart-container">
                <canvas id="activity-chart"></canvas>
            </div>
        </div>

        <div class="panel">
            <div class="panel-header">
                <h2>Repositories</h2>
                <span class="muted">{{ repos | length }} shown</span>
            </div>
            {% if repos %}
            <table id="repo-table">
                <thead>
                    <tr>
                        <th>Name</th>
                        <th>Description</th>
                        <th>Language</th>
                        <th>Stars</th>
                        <th>Forks</th>
                        <th>Updated</th>
                    </tr>
                </thead>
                <tbody></tbody>
            </table>
            <div class="pager" id="repo-pager"></div>
            {% else %}
            <div class="empty-state"><p>No public repositories.</p></div>
            {% endif %}
        </div>

        <div class="panel">
            <div class="panel-header">
                <h2>Recent Commits</h2>
                <span class="muted">{{ commits | length }} in window</span>
            </div>
            {% if commits %}
            <table id="commit-table">
                <thead>
                    <tr>
                        <th>Commit</th>
                        <th>Message</th>
                        <th>Repository</th>
                        <th>Author</th>
                        <th>Date</th>
                    </tr>
                </thead>
                <tbody></tbody>
            </table>
            <div class="pager" id="commit-pager"></div>
            {% else %}
            <div class="empty-state"><p>No commits in the selected period.</p></div>
            {% endif %}
        </div>

        <footer>
            <p>Generated by octoview on {{ generated_at }}</p>
        </footer>
    </div>

    <script>
        const CHART_LABELS = {{ chart_labels | safe }};
        const CHART_VALUES = {{ chart_values | safe }};
        const REPOS = {{ repos_json | safe }};
        const COMMITS = {{ commits_json | safe }};

        new Chart(document.getElementById('activity-chart'), {
            type: 'bar',
            data: {
                labels: CHART_LABELS,
                datasets: [{
                    label: 'Contributions',
                    data: CHART_VALUES,
                    backgroundColor: '#58a6ff80',
                    borderColor: '#58a6ff',
                    borderWidth: 1
                }]
            },
            options: {
                responsive: true,
                maintainAspectRatio: false,
                plugins: { legend: { display: false } },
                scales: {
                    x: { grid: { color: '#30363d' }, ticks: { color: '#8b949e', maxTicksLimit: 24 } },
                    y: { beginAtZero: true, grid: { color: '#30363d' }, ticks: { color: '#8b949e' } }
                }
            }
        });

        // Generic table pager: page-size select, first/prev/next/last, and
        // a sliding window of up to 5 page numbers.
        function setupPager(tableId, pagerId, rows, renderRow, sizes) {
            const body = document.querySelector('#' + tableId + ' tbody');
            const pager = document.getElementById(pagerId);
            if (!body || !pager) return;
            let page = 0;
            let pageSize = sizes[1] || sizes[0];

            function totalPages() {
                return Math.ceil(rows.length / pageSize);
            }

            function pageWindow(current, total, width) {
                let start = Math.max(0, current - Math.floor(width / 2));
                if (start + width > total) start = Math.max(0, total - width);
                const out = [];
                for (let i = start; i < Math.min(total, start + width); i++) out.push(i);
                return out;
            }

            function render() {
                const total = totalPages();
                page = Math.min(page, Math.max(0, total - 1));
                const slice = rows.slice(page * pageSize, (page + 1) * pageSize);
                body.innerHTML = slice.map(renderRow).join('');

                const btn = (text, target, disabled, active) =>
                    '<button ' + (disabled ? 'disabled ' : '') +
                    (active ? 'class="active" ' : '') +
                    'data-page="' + target + '">' + text + '</button>';

                let html = btn('«', 0, page === 0, false) +
                           btn('‹', page - 1, page === 0, false);
                for (const p of pageWindow(page, total, 5)) {
                    html += btn(p + 1, p, false, p === page);
                }
                html += btn('›', page + 1, page >= total - 1, false) +
                        btn('»', total - 1, page >= total - 1, false);
                html += '<select>' + sizes.map(s =>
                    '<option value="' + s + '"' + (s === pageSize ? ' selected' : '') + '>' +
                    s + ' / page</option>').join('') + '</select>';
                pager.innerHTML = html;

                pager.querySelectorAll('button').forEach(b =>
                    b.addEventListener('click', () => { page = parseInt(b.dataset.page); render(); }));
                pager.querySelector('select').addEventListener('change', e => {
                    pageSize = parseInt(e.target.value); page = 0; render();
                });
            }

            render();
        }

        setupPager('repo-table', 'repo-pager', REPOS, r =>
            '<tr><td><a class="repo-name" href="' + r.html_url + '">' + r.name + '</a></td>' +
            '<td>' + (r.description || '<span class="muted">—</span>') + '</td>' +
            '<td>' + (r.language || '<span class="muted">—</span>') + '</td>' +
            '<td>' + r.stargazers_count + '</td>' +
            '<td>' + r.forks_count + '</td>' +
            '<td class="muted">' + r.updated_at.slice(0, 10) + '</td></tr>',
            [5, 10, 20, 50]);

        setupPager('commit-table', 'commit-pager', COMMITS, c =>
            '<tr><td class="mono">' + c.id.slice(0, 7) + '</td>' +
            '<td>' + c.message + '</td>' +
            '<td>' + c.repo + '</td>' +
            '<td>' + c.author + '</td>' +
            '<td class="muted">' + c.timestamp.slice(0, 10) + '</td></tr>',
            [10, 10]);
    </script>
</body>
</html>
"#;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Title for the dashboard
    pub title: String,
    /// Path to output directory
    pub output_dir: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "GitHub Activity".to_string(),
            output_dir: "dashboard".to_string(),
        }
    }
}

/// Generate the HTML dashboard for one session and view.
///
/// `commits` is the full filtered commit set for the selected period; the
/// embedded pager pages through it client-side.
pub fn generate_dashboard(
    session: &Session,
    view: &ViewModel,
    commits: &[Commit],
    config: &DashboardConfig,
) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("dashboard", DASHBOARD_TEMPLATE)?;

    let template = env.get_template("dashboard")?;

    let chart_labels: Vec<&str> = view.series.iter().map(|p| p.label.as_str()).collect();
    let chart_values: Vec<u64> = view.series.iter().map(|p| p.value).collect();

    let html = template.render(context! {
        title => &config.title,
        profile => &session.profile,
        joined => session.profile.created_at.format("%b %Y").to_string(),
        generated_at => session.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        period_label => view.period.label(),
        stats => &view.stats,
        repos => &session.repositories,
        commits => commits,
        chart_labels => serde_json::to_string(&chart_labels)?,
        chart_values => serde_json::to_string(&chart_values)?,
        repos_json => serde_json::to_string(&session.repositories)?,
        commits_json => serde_json::to_string(commits)?,
    })?;

    Ok(html)
}

/// Write the dashboard to a directory: index.html plus the raw session data
pub fn write_dashboard(
    session: &Session,
    view: &ViewModel,
    commits: &[Commit],
    config: &DashboardConfig,
    base_path: &Path,
) -> Result<()> {
    let output_dir = base_path.join(&config.output_dir);
    std::fs::create_dir_all(&output_dir)?;

    let html = generate_dashboard(session, view, commits, config)?;
    std::fs::write(output_dir.join("index.html"), html)?;

    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(output_dir.join("data.json"), json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{TimePeriod, UserProfile};
    use crate::view::{build_view, filter_commits};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn session() -> Session {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let today = now.date_naive();
        let timeline: BTreeMap<_, _> = (0..crate::timeline::MAX_HISTORY_DAYS)
            .map(|i| (today - chrono::Duration::days(i), u64::from(i < 7)))
            .collect();

        Session {
            profile: UserProfile {
                login: "octocat".to_string(),
                name: Some("The Octocat".to_string()),
                avatar_url: "https://example.com/a.png".to_string(),
                bio: Some("Mascot".to_string()),
                company: None,
                location: None,
                blog: None,
                created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
                followers: 10,
                following: 2,
                public_repos: 0,
            },
            repositories: Vec::new(),
            timeline,
            commits: Vec::new(),
            fetched_at: now,
        }
    }

    #[test]
    fn test_generate_dashboard_renders_profile_and_stats() {
        let session = session();
        let commits = filter_commits(&session.commits, TimePeriod::Week, session.fetched_at);
        let view = build_view(
            &session.timeline,
            TimePeriod::Week,
            &session.commits,
            0,
            session.fetched_at,
        );

        let config = DashboardConfig {
            title: "octocat · GitHub Activity".to_string(),
            ..Default::default()
        };
        let html = generate_dashboard(&session, &view, &commits, &config).unwrap();

        assert!(html.contains("octocat · GitHub Activity"));
        assert!(html.contains("@octocat"));
        assert!(html.contains("7 Days"));
        assert!(html.contains("No commits in the selected period"));
        assert!(html.contains("No public repositories"));
    }

    #[test]
    fn test_write_dashboard_creates_index_and_data() {
        let session = session();
        let commits = filter_commits(&session.commits, TimePeriod::Week, session.fetched_at);
        let view = build_view(
            &session.timeline,
            TimePeriod::Week,
            &session.commits,
            0,
            session.fetched_at,
        );

        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::default();
        write_dashboard(&session, &view, &commits, &config, dir.path()).unwrap();

        let out = dir.path().join(&config.output_dir);
        assert!(out.join("index.html").exists());
        assert!(out.join("data.json").exists());
    }
}
