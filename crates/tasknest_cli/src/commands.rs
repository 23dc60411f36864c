use anyhow::{bail, Result};
use log::info;
use tasknest_core::{
    remember_category, restore_view, Category, CategoryId, Priority, SessionState, Store, Task,
    TaskId,
};

/// One shell invocation: a store handle plus the advisory session record.
pub struct Shell<'a> {
    store: &'a Store,
    session: &'a SessionState,
}

impl<'a> Shell<'a> {
    pub fn new(store: &'a Store, session: &'a SessionState) -> Self {
        Self { store, session }
    }

    pub fn show(&self) -> Result<()> {
        let view = restore_view(self.store, self.session)?;
        self.print_categories(&view.categories, view.selected)?;

        match view
            .selected
            .and_then(|id| view.categories.iter().find(|category| category.id == id))
        {
            Some(category) => {
                println!();
                println!("Tasks in {}:", category.name);
                print_tasks(&view.tasks);
            }
            None => println!("\nNo category selected. Use `tasknest select <id>`."),
        }
        Ok(())
    }

    pub fn select(&self, id: CategoryId) -> Result<()> {
        let Some(category) = self.store.get_category(id)? else {
            bail!("category not found: {id}");
        };
        self.remember(Some(category.id));
        println!("Selected {}", category.name);
        Ok(())
    }

    pub fn list_categories(&self) -> Result<()> {
        let categories = self.store.list_categories()?;
        let selected = restore_view(self.store, self.session)?.selected;
        self.print_categories(&categories, selected)
    }

    pub fn add_category(&self, name: &str, icon: Option<&str>, color: Option<&str>) -> Result<()> {
        let category = self.store.create_category(name, icon, color)?;
        println!("Created category {} ({})", category.name, category.id);
        Ok(())
    }

    /// Omitted `icon`/`color` keep the category's current values.
    pub fn edit_category(
        &self,
        id: CategoryId,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<()> {
        let Some(current) = self.store.get_category(id)? else {
            bail!("category not found: {id}");
        };
        let icon = icon.or(current.icon.as_deref());
        let color = color.unwrap_or(&current.color);
        self.store.update_category(id, name, icon, Some(color))?;
        println!("Updated category {id}");
        Ok(())
    }

    pub fn delete_category(&self, id: CategoryId) -> Result<()> {
        let removed = self.store.count_tasks(id)?.total;
        self.store.delete_category(id)?;
        if self.session.load().last_category_id() == Some(id) {
            self.remember(None);
        }
        println!("Deleted category {id} and {removed} task(s)");
        Ok(())
    }

    pub fn list_tasks(&self, category: Option<CategoryId>) -> Result<()> {
        let category_id = self.target_category(category)?;
        print_tasks(&self.store.list_tasks_by_category(category_id)?);
        Ok(())
    }

    pub fn add_task(
        &self,
        category: Option<CategoryId>,
        title: &str,
        description: Option<&str>,
        priority: Option<&str>,
    ) -> Result<()> {
        let category_id = self.target_category(category)?;
        let priority = match priority {
            Some(tag) => tag.parse()?,
            None => Priority::default(),
        };
        let task = self
            .store
            .create_task(category_id, title, description, priority)?;
        println!("Created task {} ({})", task.title, task.id);
        Ok(())
    }

    /// Omitted `description`/`priority` keep the task's current values.
    /// An empty description clears it.
    pub fn edit_task(
        &self,
        id: TaskId,
        title: &str,
        description: Option<&str>,
        priority: Option<&str>,
    ) -> Result<()> {
        let Some(current) = self.store.get_task(id)? else {
            bail!("task not found: {id}");
        };
        let description = description.or(current.description.as_deref());
        let priority: Priority = match priority {
            Some(tag) => tag.parse()?,
            None => current.priority,
        };
        self.store.update_task(id, title, description, priority)?;
        println!("Updated task {id}");
        Ok(())
    }

    pub fn toggle_task(&self, id: TaskId) -> Result<()> {
        let completed = self.store.toggle_task_completion(id)?;
        println!(
            "Task {id} is now {}",
            if completed { "done" } else { "open" }
        );
        Ok(())
    }

    pub fn delete_task(&self, id: TaskId) -> Result<()> {
        self.store.delete_task(id)?;
        println!("Deleted task {id}");
        Ok(())
    }

    /// Explicit id, else the remembered category if it still exists.
    fn target_category(&self, explicit: Option<CategoryId>) -> Result<CategoryId> {
        if let Some(id) = explicit {
            return Ok(id);
        }
        match restore_view(self.store, self.session)?.selected {
            Some(id) => Ok(id),
            None => bail!("no category selected; pass --category <id>"),
        }
    }

    fn print_categories(
        &self,
        categories: &[Category],
        selected: Option<CategoryId>,
    ) -> Result<()> {
        if categories.is_empty() {
            println!("No categories yet. Use `tasknest category add <name>`.");
            return Ok(());
        }
        println!("Categories:");
        for category in categories {
            let counts = self.store.count_tasks(category.id)?;
            let marker = if Some(category.id) == selected { '*' } else { ' ' };
            let icon = category
                .icon
                .as_deref()
                .map(|icon| format!("{icon} "))
                .unwrap_or_default();
            println!(
                "{marker} {}  {icon}{}  {}  {}/{} done",
                category.id, category.name, category.color, counts.completed, counts.total
            );
        }
        Ok(())
    }

    fn remember(&self, id: Option<CategoryId>) {
        if remember_category(self.session, id) {
            info!("event=selection_saved module=cli status=ok");
        } else {
            eprintln!("warning: could not save the selected category");
        }
    }
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("  (no tasks)");
        return;
    }
    for task in tasks {
        let check = if task.completed { 'x' } else { ' ' };
        println!(
            "  [{check}] {}  {}  ({}, created {})",
            task.id, task.title, task.priority, task.created_at
        );
        if let Some(description) = &task.description {
            println!("        {description}");
        }
    }
}
