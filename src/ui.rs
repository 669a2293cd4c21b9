use crate::models::MonthView;
use chrono::NaiveDate;

pub fn render_index(today: NaiveDate, month: &MonthView) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &today.format("%Y-%m-%d").to_string())
        .replace("{{YEAR}}", &month.year.to_string())
        .replace("{{MONTH}}", &month.month.to_string())
        .replace("{{LABEL}}", &month.label)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
    }

    #log-form button {
      width: 100%;
      padding: 18px;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .month-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .month-nav h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .month-nav button {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    #calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .calendar-day {
      position: relative;
      aspect-ratio: 1;
      display: grid;
      place-items: center;
      border-radius: 12px;
      background: white;
      font-weight: 500;
    }

    .calendar-day.weekday-header {
      aspect-ratio: auto;
      background: transparent;
      color: #8b857d;
      font-size: 0.8rem;
      text-transform: uppercase;
    }

    .calendar-day.is-today {
      outline: 2px solid var(--accent-2);
    }

    .calendar-day.has-logs {
      cursor: pointer;
      background: #ffe1d8;
    }

    .log-count {
      position: absolute;
      top: 4px;
      right: 6px;
      font-size: 0.7rem;
      color: var(--accent);
    }

    #day-details {
      display: none;
    }

    #day-details-list {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .log-entry {
      display: flex;
      align-items: center;
      justify-content: space-between;
      background: white;
      border-radius: 14px;
      padding: 10px 14px;
    }

    .delete-button {
      padding: 6px 12px;
      font-size: 0.85rem;
      background: var(--accent-2);
      color: white;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Tracker</h1>
    </header>

    <form id="log-form" method="post" action="/log">
      <button type="submit">Log it</button>
    </form>

    <section>
      <div class="month-nav">
        <button id="prev-month-button" type="button">&larr;</button>
        <h2 id="month-year-header">{{LABEL}}</h2>
        <button id="next-month-button" type="button">&rarr;</button>
      </div>
      <div id="calendar-grid"></div>
    </section>

    <section id="day-details">
      <h2 id="day-details-header"></h2>
      <ul id="day-details-list"></ul>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const today = '{{TODAY}}';
    let viewYear = {{YEAR}};
    let viewMonth = {{MONTH}};
    let selectedDate = null;

    const statusEl = document.getElementById('status');
    const headerEl = document.getElementById('month-year-header');
    const gridEl = document.getElementById('calendar-grid');
    const detailsEl = document.getElementById('day-details');
    const detailsHeaderEl = document.getElementById('day-details-header');
    const detailsListEl = document.getElementById('day-details-list');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const request = async (method, url) => {
      const res = await fetch(url, { method });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const pad = (value) => String(value).padStart(2, '0');

    const renderCalendar = (view) => {
      headerEl.textContent = view.label;
      gridEl.innerHTML = '';

      ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'].forEach((name) => {
        const cell = document.createElement('div');
        cell.className = 'calendar-day weekday-header';
        cell.textContent = name;
        gridEl.appendChild(cell);
      });

      for (let i = 0; i < view.first_weekday; i += 1) {
        gridEl.appendChild(document.createElement('div'));
      }

      for (let day = 1; day <= view.days_in_month; day += 1) {
        const cell = document.createElement('div');
        cell.className = 'calendar-day';
        cell.textContent = day;
        if (view.today === day) {
          cell.classList.add('is-today');
        }
        const count = view.counts[day];
        if (count) {
          cell.classList.add('has-logs');
          cell.dataset.date = `${view.year}-${pad(view.month)}-${pad(day)}`;
          const badge = document.createElement('span');
          badge.className = 'log-count';
          badge.textContent = count;
          cell.appendChild(badge);
        }
        gridEl.appendChild(cell);
      }
    };

    const renderDayDetails = (view) => {
      detailsHeaderEl.textContent = view.is_today ? "Today's Logs" : `Details for ${view.date}`;
      detailsListEl.innerHTML = '';

      if (!view.entries.length) {
        const empty = document.createElement('li');
        empty.textContent = 'Nothing logged for this day.';
        detailsListEl.appendChild(empty);
      }

      view.entries.forEach((entry) => {
        const item = document.createElement('li');
        item.className = 'log-entry';
        const time = document.createElement('span');
        time.textContent = entry.local_time;
        const del = document.createElement('button');
        del.type = 'button';
        del.className = 'delete-button';
        del.textContent = 'Delete';
        del.dataset.logId = entry.id;
        item.appendChild(time);
        item.appendChild(del);
        detailsListEl.appendChild(item);
      });

      detailsEl.style.display = 'block';
    };

    const loadMonth = async () => {
      renderCalendar(await request('GET', `/api/month?year=${viewYear}&month=${viewMonth}`));
    };

    const loadDay = async () => {
      if (selectedDate) {
        renderDayDetails(await request('GET', `/api/day?date=${selectedDate}`));
      }
    };

    const refresh = async () => {
      await Promise.all([loadMonth(), loadDay()]);
    };

    const changeMonth = (offset) => {
      const index = viewYear * 12 + (viewMonth - 1) + offset;
      viewYear = Math.floor(index / 12);
      viewMonth = (index % 12) + 1;
      selectedDate = null;
      detailsEl.style.display = 'none';
      loadMonth().catch((err) => setStatus(err.message, 'error'));
    };

    document.getElementById('log-form').addEventListener('submit', (event) => {
      event.preventDefault();
      request('POST', '/api/logs')
        .then(refresh)
        .then(() => setStatus('', ''))
        .catch((err) => setStatus(err.message, 'error'));
    });

    gridEl.addEventListener('click', (event) => {
      const cell = event.target.closest('.has-logs');
      if (cell) {
        selectedDate = cell.dataset.date;
        loadDay().catch((err) => setStatus(err.message, 'error'));
      }
    });

    detailsListEl.addEventListener('click', (event) => {
      if (event.target.classList.contains('delete-button')) {
        request('DELETE', `/api/logs/${event.target.dataset.logId}`)
          .then(refresh)
          .catch((err) => setStatus(err.message, 'error'));
      }
    });

    document.getElementById('prev-month-button').addEventListener('click', () => changeMonth(-1));
    document.getElementById('next-month-button').addEventListener('click', () => changeMonth(1));

    if (today.startsWith(`${viewYear}-${pad(viewMonth)}`)) {
      selectedDate = today;
    }
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
