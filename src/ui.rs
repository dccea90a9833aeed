use crate::dates::Week;
use crate::models::{PRESET_COLORS, default_color};

pub fn render_index(week: &Week) -> String {
    let swatches: String = PRESET_COLORS
        .iter()
        .map(|color| {
            format!(
                r#"<button type="button" class="swatch" data-color="{color}" style="background:{color}" aria-label="Pick {color}"></button>"#
            )
        })
        .collect();

    INDEX_HTML
        .replace("{{RANGE}}", &week.range_label())
        .replace("{{SWATCHES}}", &swatches)
        .replace("{{DEFAULT_COLOR}}", default_color())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg: #0a0a0a;
      --card: rgba(23, 23, 23, 0.6);
      --line: rgba(255, 255, 255, 0.1);
      --ink: #fafafa;
      --muted: #a3a3a3;
      --accent: #10b981;
      --danger: #f87171;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, "Segoe UI", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 16px 48px;
    }

    .app {
      width: min(1100px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(2rem, 4vw, 2.6rem);
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .top {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 16px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 18px;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: flex-end;
    }

    label {
      display: block;
      margin-bottom: 6px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    input[type="text"] {
      width: 100%;
      padding: 12px;
      border-radius: 12px;
      border: 1px solid var(--line);
      background: var(--bg);
      color: var(--ink);
      font-size: 1rem;
    }

    .grow {
      flex: 1 1 220px;
    }

    .swatches {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      align-items: center;
    }

    .swatch {
      width: 28px;
      height: 28px;
      border-radius: 999px;
      border: 2px solid var(--line);
      cursor: pointer;
    }

    .swatch.active {
      border-color: white;
    }

    .btn-add {
      border: none;
      border-radius: 12px;
      padding: 12px 18px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    .stat .label {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .week-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .grid {
      border: 1px solid var(--line);
      border-radius: 18px;
      overflow: hidden;
    }

    .row {
      display: grid;
      grid-template-columns: 1.4fr repeat(7, 1fr) 0.8fr;
      align-items: stretch;
      border-top: 1px solid var(--line);
    }

    .row.head {
      border-top: none;
      color: var(--muted);
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
    }

    .row > div {
      padding: 10px;
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .row .center {
      justify-content: center;
    }

    .dot {
      width: 12px;
      height: 12px;
      border-radius: 999px;
      flex-shrink: 0;
    }

    .created {
      font-size: 0.75rem;
      color: var(--muted);
    }

    .day {
      width: 100%;
      border: none;
      border-left: 1px solid rgba(255, 255, 255, 0.05);
      background: transparent;
      color: #737373;
      font-size: 1.2rem;
      cursor: pointer;
    }

    .day[aria-pressed="true"] {
      background: rgba(16, 185, 129, 0.15);
      color: #34d399;
    }

    .delete {
      border: none;
      background: transparent;
      color: var(--muted);
      cursor: pointer;
    }

    .delete:hover {
      color: var(--danger);
    }

    .empty {
      padding: 32px;
      text-align: center;
      color: var(--muted);
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: #34d399;
    }

    @media (max-width: 760px) {
      .top {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Tracker</h1>
      <p class="subtitle">Check off each day, keep the streak going.</p>
    </header>

    <section class="top">
      <div class="card">
        <form id="habit-form">
          <div class="grow">
            <label for="habit-name">New Habit</label>
            <input id="habit-name" type="text" placeholder="e.g., Morning Run, Read 10 pages" autocomplete="off" />
          </div>
          <div>
            <label>Color</label>
            <div class="swatches">
              {{SWATCHES}}
              <input id="custom-color" type="color" value="{{DEFAULT_COLOR}}" aria-label="Custom color" />
            </div>
          </div>
          <button class="btn-add" type="submit">Add Habit</button>
        </form>
      </div>
      <div class="stats">
        <div class="card stat"><div class="label">Habits</div><div class="value" id="stat-habits">0</div></div>
        <div class="card stat"><div class="label">Completions</div><div class="value" id="stat-completions">0</div></div>
        <div class="card stat"><div class="label">Best Streak</div><div class="value" id="stat-streak">0d</div></div>
      </div>
    </section>

    <section>
      <div class="week-header">
        <h2>This Week</h2>
        <span class="subtitle" id="week-range">{{RANGE}}</span>
      </div>
      <div class="grid" id="grid"></div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const form = document.getElementById('habit-form');
    const nameEl = document.getElementById('habit-name');
    const customColorEl = document.getElementById('custom-color');
    const swatches = Array.from(document.querySelectorAll('.swatch'));
    const gridEl = document.getElementById('grid');
    const rangeEl = document.getElementById('week-range');
    const statusEl = document.getElementById('status');
    const statHabits = document.getElementById('stat-habits');
    const statCompletions = document.getElementById('stat-completions');
    const statStreak = document.getElementById('stat-streak');

    let color = customColorEl.value;
    let week = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const flash = (message, type) => {
      setStatus(message, type);
      setTimeout(() => setStatus('', ''), 1500);
    };

    const pickColor = (value) => {
      color = value;
      customColorEl.value = value;
      swatches.forEach((s) => s.classList.toggle('active', s.dataset.color === value));
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) node.className = className;
      if (text !== undefined) node.textContent = text;
      return node;
    };

    const renderGrid = (habits) => {
      gridEl.replaceChildren();
      const head = el('div', 'row head');
      head.append(el('div', '', 'Habit'));
      (week ? week.days : []).forEach((day) => head.append(el('div', 'center', day.label)));
      head.append(el('div', 'center', 'Streak'));
      gridEl.append(head);

      if (!habits.length) {
        gridEl.append(el('div', 'empty', 'No habits yet. Add one above to get started.'));
        return;
      }

      habits.forEach((habit) => {
        const row = el('div', 'row');
        const title = el('div');
        const dot = el('span', 'dot');
        dot.style.backgroundColor = habit.color;
        const text = el('div');
        text.append(el('div', '', habit.name));
        text.append(el('div', 'created', 'Created ' + new Date(habit.createdAt).toLocaleDateString()));
        title.append(dot, text);
        row.append(title);

        habit.week.forEach((cell) => {
          const wrap = el('div', 'center');
          const btn = el('button', 'day', '✓');
          btn.setAttribute('aria-pressed', String(cell.checked));
          btn.setAttribute('aria-label', 'Toggle ' + cell.label);
          btn.addEventListener('click', () => toggle(habit.id, cell.date));
          wrap.append(btn);
          row.append(wrap);
        });

        const tail = el('div', 'center');
        tail.append(el('strong', '', habit.streak + 'd'));
        const del = el('button', 'delete', '✕');
        del.setAttribute('aria-label', 'Delete habit');
        del.addEventListener('click', () => remove(habit.id));
        tail.append(del);
        row.append(tail);
        gridEl.append(row);
      });
    };

    const loadStats = async () => {
      const stats = await request('/api/stats');
      statHabits.textContent = stats.habitCount;
      statCompletions.textContent = stats.totalCompletions;
      statStreak.textContent = stats.bestStreak + 'd';
    };

    const refresh = async () => {
      week = await request('/api/week');
      rangeEl.textContent = week.label;
      const habits = await request('/api/habits');
      renderGrid(habits);
      await loadStats();
    };

    const toggle = (id, date) => {
      request(`/api/habits/${encodeURIComponent(id)}/toggle`, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ date })
      })
        .then(refresh)
        .catch((err) => setStatus(err.message, 'error'));
    };

    const remove = (id) => {
      request(`/api/habits/${encodeURIComponent(id)}`, { method: 'DELETE' })
        .then(refresh)
        .catch((err) => setStatus(err.message, 'error'));
    };

    swatches.forEach((s) => s.addEventListener('click', () => pickColor(s.dataset.color)));
    customColorEl.addEventListener('input', () => pickColor(customColorEl.value));

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const name = nameEl.value.trim();
      if (!name) {
        setStatus('Please enter a habit name.', 'error');
        return;
      }
      request('/api/habits', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ name, color })
      })
        .then(() => {
          nameEl.value = '';
          flash('Habit added', 'ok');
          return refresh();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    pickColor(color);
    refresh().catch((err) => setStatus(err.message, 'error'));
    setInterval(() => refresh().catch((err) => setStatus(err.message, 'error')), 60 * 1000);
  </script>
</body>
</html>
"#;
