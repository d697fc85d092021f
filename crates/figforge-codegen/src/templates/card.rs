pub const HTML: &str = r#"<div class="{css_class}"
     [class.elevated]="elevated"
     [class.outlined]="outlined">
  <div class="card-header" *ngIf="showHeader">
    <h3 class="card-title">{{ title || '{display_name}' }}</h3>
    <p class="card-subtitle" *ngIf="subtitle">{{ subtitle }}</p>
  </div>
  <div class="card-content">
    <ng-content></ng-content>
  </div>
  <div class="card-actions" *ngIf="showActions">
    <button mat-button (click)="onPrimaryAction()">{{ primaryActionText }}</button>
    <button mat-button (click)="onSecondaryAction()">{{ secondaryActionText }}</button>
  </div>
</div>
"#;

pub const SCSS: &str = r#".{css_class} {
  background: white;
  border-radius: 12px;
  overflow: hidden;
  transition: all 0.2s ease;

  &.elevated {
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.1);

    &:hover {
      box-shadow: 0 8px 25px rgba(0, 0, 0, 0.15);
      transform: translateY(-2px);
    }
  }

  &.outlined {
    border: 1px solid #e9ecef;
  }

  .card-header {
    padding: 1.5rem 1.5rem 0;

    .card-title {
      margin: 0 0 0.5rem 0;
      font-size: 1.25rem;
      font-weight: 600;
      color: #333;
    }

    .card-subtitle {
      margin: 0;
      color: #666;
      font-size: 0.875rem;
    }
  }

  .card-content {
    padding: 1.5rem;
  }

  .card-actions {
    padding: 0 1.5rem 1.5rem;
    display: flex;
    gap: 0.75rem;
    justify-content: flex-end;
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
  @Input() subtitle: string = '';
  @Input() elevated: boolean = true;
  @Input() outlined: boolean = false;
  @Input() showHeader: boolean = true;
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
