use lightdash::prelude::*;

pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

pub fn render_table<T: TableRow>(items: &[T]) -> String {
    let headers: Vec<String> = T::headers().iter().map(ToString::to_string).collect();
    let rows: Vec<Vec<String>> = items.iter().map(TableRow::row).collect();
    render_table_dynamic(&headers, &rows)
}

pub fn render_table_dynamic(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);

    let mut out = String::new();
    out.push_str(&format_row(headers, &widths));
    out.push('\n');
    out.push_str(&format_separator(&widths));

    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }

    out
}

// widths in chars, so names with non-ascii letters stay aligned
fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if idx >= widths.len() {
                widths.push(len);
            } else {
                widths[idx] = widths[idx].max(len);
            }
        }
    }
    widths
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    use std::fmt::Write as _;
    let mut out = String::new();
    for (idx, cell) in row.iter().enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        let width = widths.get(idx).copied().unwrap_or(0);
        let _ = write!(out, "{cell:<width$}");
    }
    out.trim_end().to_string()
}

fn format_separator(widths: &[usize]) -> String {
    let mut out = String::new();
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*width));
    }
    out
}

impl TableRow for Project {
    fn headers() -> &'static [&'static str] {
        &["uuid", "name"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.project_uuid.clone(), self.name.clone()]
    }
}

impl TableRow for DashboardSet {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "items", "created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.items.len().to_string(),
            self.created_at.format("%Y-%m-%d").to_string(),
        ]
    }
}

impl TableRow for DashboardSetItem {
    fn headers() -> &'static [&'static str] {
        &["type", "name", "uuid", "url"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.kind.to_string(),
            self.name.clone(),
            self.uuid.clone(),
            self.url.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        let projects = vec![
            Project {
                project_uuid: "p1".into(),
                name: "Analytics".into(),
            },
            Project {
                project_uuid: "project-22".into(),
                name: "Ops".into(),
            },
        ];
        let table = render_table(&projects);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "uuid        name");
        assert_eq!(lines[1], "----------  ---------");
        assert_eq!(lines[2], "p1          Analytics");
        assert_eq!(lines[3], "project-22  Ops");
    }

    #[test]
    fn test_set_item_row() {
        let item = DashboardSetItem {
            uuid: "explore:orders".into(),
            name: "Orders".into(),
            url: "https://app.lightdash.cloud/projects/p/tables/orders".into(),
            kind: ResultKind::Explore,
        };
        assert_eq!(item.row()[0], "explore");
        assert_eq!(DashboardSetItem::headers().len(), item.row().len());
    }
}
