pub const HTML: &str = r#"<div class="{css_class}-container">
  <div class="{css_class}-content">
    <h3>{{ title || '{display_name}' }}</h3>
    <p>{{ description }}</p>
    <div class="component-actions" *ngIf="showActions">
      <button mat-button (click)="onPrimaryAction()">{{ primaryActionText }}</button>
      <button mat-button (click)="onSecondaryAction()">{{ secondaryActionText }}</button>
    </div>
  </div>
</div>
"#;

pub const SCSS: &str = r#".{css_class}-container {
  display: flex;
  align-items: center;
  justify-content: center;
  padding: 1rem;

  .{css_class}-content {
    width: 100%;
    background: #ffffff;
    border-radius: 8px;
    padding: 1.5rem;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);

    h3 {
      margin: 0 0 1rem 0;
      color: #333;
      font-weight: 600;
    }

    p {
      margin: 0;
      color: #666;
      line-height: 1.5;
    }

    .component-actions {
      margin-top: 1.5rem;
      display: flex;
      gap: 0.75rem;
      justify-content: flex-end;
    }
  }
}
"#;

pub const TS: &str = r#"import { Component, Input, Output, EventEmitter } from '@angular/core';

@Component({
  selector: '{selector}',
  templateUrl: './{css_class}.component.html',
  styleUrls: ['./{css_class}.component.scss']
})
export class {class_name} {
  @Input() title: string = '{display_name}';
  @Input() description: string = 'This is a {display_name} component from your design system.';
  @Input() showActions: boolean = false;
  @Input() primaryActionText: string = 'Action';
  @Input() secondaryActionText: string = 'Cancel';

  @Output() primaryAction = new EventEmitter<void>();
  @Output() secondaryAction = new EventEmitter<void>();

  onPrimaryAction(): void {
    this.primaryAction.emit();
  }

  onSecondaryAction(): void {
    this.secondaryAction.emit();
  }
}
"#;
